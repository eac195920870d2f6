mod header_bar;
mod login_modal;
mod stats_panel;
mod task_composer;
mod task_list;

pub use header_bar::HeaderBar;
pub use login_modal::LoginModalView;
pub use stats_panel::StatsPanel;
pub use task_composer::TaskComposer;
pub use task_list::TaskList;
