pub mod common;
pub mod contact;
pub mod project;

pub use common::{body_or_default, MessageResponse};
pub use contact::{submit_contact, ContactRequest};
pub use project::{
    create_project, delete_project, get_project, list_projects, update_project,
    CreateProjectRequest, ProjectResponse, UpdateProjectRequest,
};
