//! Account-level access: delegates and accounts

use serde::Serialize;
use serde_json::json;
use yametrika_core::params::wrapped;
use yametrika_core::Transport;
use yametrika_domain::{ApiObject, Result};

use super::client::Metrika;
use crate::api::RequestSpec;

impl<T: Transport> Metrika<T> {
    /// Users with full access to the current account
    pub async fn delegates(&mut self) -> Result<ApiObject> {
        self.get("delegates").await
    }

    pub async fn add_delegate(&mut self, user_login: &str) -> Result<ApiObject> {
        let spec = RequestSpec::post(self.url("delegates"));
        self.send_body(spec, wrapped("delegate", &json!({"user_login": user_login}))?).await
    }

    /// Replace the whole delegate list
    pub async fn edit_delegates<D: Serialize + ?Sized>(&mut self, delegates: &D) -> Result<ApiObject> {
        let spec = RequestSpec::put(self.url("delegates"));
        self.send_body(spec, wrapped("delegates", delegates)?).await
    }

    pub async fn delete_delegate(&mut self, user_login: &str) -> Result<ApiObject> {
        let login = urlencoding::encode(user_login);
        self.delete(&format!("delegate/{login}")).await
    }

    /// Accounts the current user is a delegate of
    pub async fn accounts(&mut self) -> Result<ApiObject> {
        self.get("accounts").await
    }

    /// Replace the account list
    ///
    /// Accounts missing from `accounts` lose the current user as delegate.
    pub async fn edit_accounts<A: Serialize + ?Sized>(&mut self, accounts: &A) -> Result<ApiObject> {
        let spec = RequestSpec::put(self.url("accounts"));
        self.send_body(spec, wrapped("accounts", accounts)?).await
    }

    pub async fn delete_account(&mut self, user_login: &str) -> Result<ApiObject> {
        let login = urlencoding::encode(user_login);
        self.delete(&format!("account/{login}")).await
    }
}
