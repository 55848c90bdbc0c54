pub mod attachments;
pub mod comments;
pub mod labels;
pub mod projects;
pub mod sprints;
pub mod task_labels;
pub mod tasks;
pub mod team_members;
pub mod teams;
pub mod users;
pub mod work_times;
pub mod workspaces;

pub use attachments::AttachmentRepo;
pub use comments::CommentRepo;
pub use labels::LabelRepo;
pub use projects::ProjectRepo;
pub use sprints::SprintRepo;
pub use task_labels::TaskLabelRepo;
pub use tasks::TaskRepo;
pub use team_members::TeamMemberRepo;
pub use teams::TeamRepo;
pub use users::UserRepo;
pub use work_times::WorkTimeRepo;
pub use workspaces::WorkspaceRepo;
