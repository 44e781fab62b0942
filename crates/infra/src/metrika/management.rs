//! Counter sub-resources: goals, filters, operations and grants

use serde_json::json;
use yametrika_core::params::wrapped;
use yametrika_core::Transport;
use yametrika_domain::{ApiObject, FilterSpec, GoalSpec, GrantSpec, OperationSpec, Result};

use super::client::Metrika;
use crate::api::RequestSpec;

fn login_segment(login: &str) -> String {
    urlencoding::encode(login).into_owned()
}

impl<T: Transport> Metrika<T> {
    /* ---------------------------------------------------------------------- */
    /* Goals */
    /* ---------------------------------------------------------------------- */

    pub async fn goal_list(&mut self, counter_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/goals")).await
    }

    pub async fn goal(&mut self, counter_id: i64, goal_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/goal/{goal_id}")).await
    }

    pub async fn add_goal(&mut self, counter_id: i64, goal: &GoalSpec) -> Result<ApiObject> {
        let spec = RequestSpec::post(self.url(&format!("counter/{counter_id}/goals")));
        self.send_body(spec, wrapped("goal", goal)?).await
    }

    pub async fn edit_goal(&mut self, counter_id: i64, goal_id: i64, goal: &GoalSpec) -> Result<ApiObject> {
        let spec = RequestSpec::put(self.url(&format!("counter/{counter_id}/goal/{goal_id}")));
        self.send_body(spec, wrapped("goal", goal)?).await
    }

    pub async fn delete_goal(&mut self, counter_id: i64, goal_id: i64) -> Result<ApiObject> {
        self.delete(&format!("counter/{counter_id}/goal/{goal_id}")).await
    }

    /* ---------------------------------------------------------------------- */
    /* Filters */
    /* ---------------------------------------------------------------------- */

    pub async fn filter_list(&mut self, counter_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/filters")).await
    }

    pub async fn filter(&mut self, counter_id: i64, filter_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/filter/{filter_id}")).await
    }

    pub async fn add_filter(&mut self, counter_id: i64, filter: &FilterSpec) -> Result<ApiObject> {
        let spec = RequestSpec::post(self.url(&format!("counter/{counter_id}/filters")));
        self.send_body(spec, wrapped("filter", filter)?).await
    }

    pub async fn edit_filter(
        &mut self,
        counter_id: i64,
        filter_id: i64,
        filter: &FilterSpec,
    ) -> Result<ApiObject> {
        let spec = RequestSpec::put(self.url(&format!("counter/{counter_id}/filter/{filter_id}")));
        self.send_body(spec, wrapped("filter", filter)?).await
    }

    pub async fn delete_filter(&mut self, counter_id: i64, filter_id: i64) -> Result<ApiObject> {
        self.delete(&format!("counter/{counter_id}/filter/{filter_id}")).await
    }

    /* ---------------------------------------------------------------------- */
    /* Operations */
    /* ---------------------------------------------------------------------- */

    pub async fn operation_list(&mut self, counter_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/operations")).await
    }

    pub async fn operation(&mut self, counter_id: i64, operation_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/operation/{operation_id}")).await
    }

    pub async fn add_operation(&mut self, counter_id: i64, operation: &OperationSpec) -> Result<ApiObject> {
        let spec = RequestSpec::post(self.url(&format!("counter/{counter_id}/operations")));
        self.send_body(spec, wrapped("operation", operation)?).await
    }

    pub async fn edit_operation(
        &mut self,
        counter_id: i64,
        operation_id: i64,
        operation: &OperationSpec,
    ) -> Result<ApiObject> {
        let spec =
            RequestSpec::put(self.url(&format!("counter/{counter_id}/operation/{operation_id}")));
        self.send_body(spec, wrapped("operation", operation)?).await
    }

    pub async fn delete_operation(&mut self, counter_id: i64, operation_id: i64) -> Result<ApiObject> {
        self.delete(&format!("counter/{counter_id}/operation/{operation_id}")).await
    }

    /* ---------------------------------------------------------------------- */
    /* Grants */
    /* ---------------------------------------------------------------------- */

    pub async fn grant_list(&mut self, counter_id: i64) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/grants")).await
    }

    pub async fn grant(&mut self, counter_id: i64, user_login: &str) -> Result<ApiObject> {
        self.get(&format!("counter/{counter_id}/grant/{}", login_segment(user_login))).await
    }

    pub async fn add_grant(&mut self, counter_id: i64, grant: &GrantSpec) -> Result<ApiObject> {
        let spec = RequestSpec::post(self.url(&format!("counter/{counter_id}/grants")));
        let body = json!({"perm": grant.perm, "user_login": grant.user_login});
        self.send_body(spec, wrapped("grant", &body)?).await
    }

    /// Change the permission of an existing grant
    pub async fn edit_grant(&mut self, counter_id: i64, user_login: &str, perm: &str) -> Result<ApiObject> {
        let resource = format!("counter/{counter_id}/grant/{}", login_segment(user_login));
        let spec = RequestSpec::put(self.url(&resource));
        let body = json!({"perm": perm});
        self.send_body(spec, wrapped("grant", &body)?).await
    }

    pub async fn delete_grant(&mut self, counter_id: i64, user_login: &str) -> Result<ApiObject> {
        self.delete(&format!("counter/{counter_id}/grant/{}", login_segment(user_login))).await
    }
}
