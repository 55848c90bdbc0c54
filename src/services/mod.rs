pub mod attachments_service;
pub mod comments_service;
pub mod context;
pub mod labels_service;
pub mod projects_service;
pub mod scope;
pub mod sprints_service;
pub mod tasks_service;
pub mod team_members_service;
pub mod teams_service;
pub mod users_service;
pub mod work_times_service;
pub mod workspaces_service;

pub use attachments_service::AttachmentsService;
pub use comments_service::CommentsService;
pub use labels_service::LabelsService;
pub use projects_service::ProjectsService;
pub use sprints_service::SprintsService;
pub use tasks_service::TasksService;
pub use team_members_service::TeamMembersService;
pub use teams_service::TeamsService;
pub use users_service::UsersService;
pub use work_times_service::WorkTimesService;
pub use workspaces_service::WorkspacesService;
