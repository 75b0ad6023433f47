use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::principal::SessionPrincipalId,
};

/// Retrieves the signed-in principal's ID from session
///
/// # Arguments
/// - `session`: The visitor's session
///
/// # Returns
/// - `Ok(String)`: Principal ID present in session
/// - `Err(Error::AuthError(AuthError::PrincipalNotInSession))`: No principal in session
/// - `Err(Error)`: Session read failure
pub async fn get_principal_from_session(session: &Session) -> Result<String, Error> {
    let Some(principal_id) = SessionPrincipalId::get(session).await? else {
        return Err(Error::AuthError(AuthError::PrincipalNotInSession));
    };

    Ok(principal_id)
}
