mod state;
mod view;

use crate::gateway::DataGateway;
use crate::missions::MissionBoard;
use crate::refresh::RefreshSchedule;

pub(super) struct App<G: DataGateway> {
    gateway: G,
    board: MissionBoard,
    backend_label: String,
    selection: usize,
    show_help: bool,
    schedule: Option<RefreshSchedule>,
}
