mod registration_request;

pub use registration_request::{
    NewRegistrationRequest, RegistrationRequest, RequestStatus, SelectedPlan,
};
