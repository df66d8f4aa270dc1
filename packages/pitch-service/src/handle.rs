use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle,
};

use pitch_domain::SearchState;

use crate::QueryController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	SetQuery(String),
	Clear,
	SearchNow,
}

/// Presentation-side handle to a controller running on its own task.
pub struct SearchHandle {
	commands: mpsc::UnboundedSender<Command>,
	state: watch::Receiver<SearchState>,
	task: JoinHandle<()>,
}
impl SearchHandle {
	pub fn set_query(&self, text: impl Into<String>) -> bool {
		self.commands.send(Command::SetQuery(text.into())).is_ok()
	}

	pub fn clear(&self) -> bool {
		self.commands.send(Command::Clear).is_ok()
	}

	pub fn search_now(&self) -> bool {
		self.commands.send(Command::SearchNow).is_ok()
	}

	pub fn state(&self) -> SearchState {
		self.state.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchState> {
		self.state.clone()
	}

	/// Stops accepting commands and waits for the controller task to exit.
	pub async fn shutdown(self) {
		let Self { commands, task, .. } = self;

		drop(commands);

		if let Err(err) = task.await {
			tracing::warn!(error = %err, "Search controller task ended abnormally.");
		}
	}
}

impl QueryController {
	/// Moves the controller onto its own task and returns a command handle.
	pub fn spawn(self) -> SearchHandle {
		let (commands, rx) = mpsc::unbounded_channel();
		let state = self.subscribe();
		let task = tokio::spawn(self.run(rx));

		SearchHandle { commands, state, task }
	}

	async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
		loop {
			tokio::select! {
				command = commands.recv() => match command {
					Some(command) => self.apply(command),
					None => break,
				},
				Some(event) = self.events_rx.recv() => self.handle_event(event),
			}
		}
	}

	fn apply(&mut self, command: Command) {
		match command {
			Command::SetQuery(text) => self.set_query(&text),
			Command::Clear => self.clear(),
			Command::SearchNow => self.search_now(),
		}
	}
}
