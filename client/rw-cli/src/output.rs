use crate::error::{CliError, Result as CliResult};

use std::panic::Location;

use error_location::ErrorLocation;
use rw_core::{Access, Identity};
use rw_session::SessionState;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct StateView<'a> {
    phase: &'static str,
    loading: bool,
    identity: Option<&'a Identity>,
}

/// JSON form of a session snapshot
#[track_caller]
pub(crate) fn state_json(state: &SessionState) -> CliResult<Value> {
    to_value(&StateView {
        phase: state.phase().as_str(),
        loading: state.loading(),
        identity: state.identity().map(|identity| identity.as_ref()),
    })
}

#[track_caller]
pub(crate) fn access_json(access: &Access, state: &SessionState) -> CliResult<Value> {
    let mut value = to_value(access)?;
    if let Value::Object(map) = &mut value {
        map.insert("session".to_string(), state_json(state)?);
    }
    Ok(value)
}

#[track_caller]
pub(crate) fn to_value<T: Serialize>(value: &T) -> CliResult<Value> {
    let caller = Location::caller();
    serde_json::to_value(value).map_err(|e| CliError::Output {
        message: format!("Failed to serialize output: {e}"),
        location: ErrorLocation::from(caller),
    })
}

#[track_caller]
pub(crate) fn render(value: &Value, pretty: bool) -> CliResult<String> {
    let caller = Location::caller();
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    output.map_err(|e| CliError::Output {
        message: format!("Error serializing response: {e}"),
        location: ErrorLocation::from(caller),
    })
}

pub(crate) fn print(value: &Value, pretty: bool) -> CliResult<()> {
    println!("{}", render(value, pretty)?);
    Ok(())
}
