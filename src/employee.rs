//! Random employee lookup against the randomuser.me API.
//!
//! One GET, one decode, first result wins. There is no retry: a failure is
//! reported straight back to the wizard, which turns it into a user-facing
//! message.
use crate::error::FetchError;
use serde::Deserialize;
use std::time::Duration;

/// Default endpoint for random person lookups.
pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";

/// The person a draft is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<RandomUser>,
}

#[derive(Debug, Deserialize)]
struct RandomUser {
    name: RandomUserName,
}

#[derive(Debug, Deserialize)]
struct RandomUserName {
    #[allow(dead_code)]
    title: String,
    first: String,
    last: String,
}

/// Anything that can produce an employee for the wizard.
pub trait EmployeeSource {
    fn fetch_employee(&self) -> Result<Employee, FetchError>;
}

/// Decode a randomuser.me response body into its first employee.
///
/// The body is taken as raw bytes so invalid UTF-8 is a decode failure
/// rather than a transport one.
pub fn decode_employee(body: &[u8]) -> Result<Employee, FetchError> {
    let response: RandomUserResponse = serde_json::from_slice(body)?;
    let user = response
        .results
        .into_iter()
        .next()
        .ok_or(FetchError::EmptyResult)?;
    Ok(Employee {
        first_name: user.name.first,
        last_name: user.name.last,
    })
}

/// Blocking HTTP client for the random user endpoint.
pub struct RandomUserClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl RandomUserClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EmployeeSource for RandomUserClient {
    fn fetch_employee(&self) -> Result<Employee, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "fetching random employee");
        let mut response = self
            .agent
            .get(self.endpoint.as_str())
            .header(
                "User-Agent",
                concat!("coffeetbl/", env!("CARGO_PKG_VERSION")),
            )
            .call()?;
        let body = response.body_mut().read_to_vec()?;
        let employee = decode_employee(&body)?;
        tracing::debug!(
            first = %employee.first_name,
            last = %employee.last_name,
            "decoded employee"
        );
        Ok(employee)
    }
}
