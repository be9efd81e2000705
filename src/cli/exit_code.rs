use super::{commands::CommandResult, exit_status::ExitStatus};

/// `Failure` when the command ran but what it looked for does not exist.
pub fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.found {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    }
}
