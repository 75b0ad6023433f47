use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

/// Session key holding the signed-in principal.
///
/// Written by the host's authentication flow; the dashboard only reads it.
pub const SESSION_PRINCIPAL_ID_KEY: &str = "meridian:principal:id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionPrincipalId(pub String);

impl SessionPrincipalId {
    /// Insert principal ID into session
    pub async fn insert(session: &Session, principal_id: &str) -> Result<(), Error> {
        session
            .insert(
                SESSION_PRINCIPAL_ID_KEY,
                SessionPrincipalId(principal_id.to_string()),
            )
            .await?;

        Ok(())
    }

    /// Get principal ID from session
    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        let principal_id = session
            .get::<SessionPrincipalId>(SESSION_PRINCIPAL_ID_KEY)
            .await?
            .map(|SessionPrincipalId(id)| id)
            .filter(|id| !id.is_empty());

        Ok(principal_id)
    }
}

#[cfg(test)]
mod tests {
    use meridian_test_utils::prelude::*;

    use crate::server::model::session::principal::{
        SessionPrincipalId, SESSION_PRINCIPAL_ID_KEY,
    };

    /// Expect Some when principal ID is present in session
    #[tokio::test]
    async fn test_get_session_principal_id_some() -> Result<(), TestError> {
        let test = TestSetup::new().await?;
        SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
            .await
            .unwrap();

        let result = SessionPrincipalId::get(&test.session).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_deref(), Some(TEST_PRINCIPAL_ID));

        Ok(())
    }

    /// Expect None when no principal ID is present in session
    #[tokio::test]
    async fn test_get_session_principal_id_none() -> Result<(), TestError> {
        let test = TestSetup::new().await?;

        let result = SessionPrincipalId::get(&test.session).await;

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());

        Ok(())
    }

    /// Expect None when an empty principal ID was stored
    #[tokio::test]
    async fn test_get_session_principal_id_empty() -> Result<(), TestError> {
        let test = TestSetup::new().await?;
        test.session
            .insert(SESSION_PRINCIPAL_ID_KEY, SessionPrincipalId(String::new()))
            .await?;

        let result = SessionPrincipalId::get(&test.session).await;

        assert!(result.unwrap().is_none());

        Ok(())
    }
}
