pub mod controller;
pub mod deferred;
pub mod navigation;
pub mod template;

pub use controller::{
    FetchTicket, PendingSubmit, ProfileState, ProfileViewController, SubmitOutcome,
    SubmitRejected,
};
pub use navigation::ProfileViewRequest;
pub use template::{Template, TemplateProps};
