//! Outgoing request plumbing shared by every API call

mod endpoints;
mod pipeline;

pub use endpoints::{API_PREFIX, Endpoints};
pub use pipeline::{
    CSRF_REFRESH_MINUTES, CsrfRefresh, FailureAction, HttpMethod, RequestPipeline, ResponseFailure,
};
