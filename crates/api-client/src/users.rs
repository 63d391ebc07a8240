//! User management view state
//!
//! A list of accounts plus one form that either creates a new account or
//! edits the selected one. Every successful mutation refetches the list.

use tracing::{debug, warn};

use taskdeck_core::{FormMode, User, UserForm, UserId, UserSubmission};

use crate::api::UserApi;
use crate::error::Result;

pub struct UserDirectory<A> {
    api: A,
    users: Vec<User>,
    form: UserForm,
    mode: FormMode,
}

impl<A: UserApi> UserDirectory<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            users: Vec::new(),
            form: UserForm::default(),
            mode: FormMode::Create,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Reload the account list
    pub async fn refresh(&mut self) -> Result<()> {
        self.users = self.api.list_users().await.inspect_err(|e| {
            warn!("Failed to load users: {}", e);
        })?;
        Ok(())
    }

    /// Switch the form to editing `id`. Returns false if the account is not
    /// in the list.
    pub fn begin_edit(&mut self, id: UserId) -> bool {
        let Some(user) = self.users.iter().find(|u| u.id == id) else {
            debug!("Cannot edit user {}, not listed", id);
            return false;
        };
        self.form.seed(user);
        self.mode = FormMode::Edit(id);
        true
    }

    /// Back to an empty create form
    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.mode = FormMode::Create;
    }

    /// Create or update from the form, then reset the form and refetch.
    ///
    /// A validation failure is returned before any request; the form keeps
    /// its contents on any error.
    pub async fn submit(&mut self) -> Result<User> {
        let submission = self.form.validate(self.mode)?;
        let user = match submission {
            UserSubmission::Create(new_user) => self.api.create_user(&new_user).await,
            UserSubmission::Update(id, update) => self.api.update_user(id, &update).await,
        }
        .inspect_err(|e| warn!("Failed to save user: {}", e))?;

        self.cancel_edit();
        self.refresh().await?;
        Ok(user)
    }

    /// Delete an account, then refetch
    pub async fn delete(&mut self, id: UserId) -> Result<()> {
        self.api.delete_user(id).await.inspect_err(|e| {
            warn!("Failed to delete user {}: {}", id, e);
        })?;
        if self.mode == FormMode::Edit(id) {
            self.cancel_edit();
        }
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::testing::FakeApi;
    use std::sync::Arc;

    async fn directory() -> (UserDirectory<Arc<FakeApi>>, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::new());
        api.seed_user("Ada", "ada@example.com");
        let mut dir = UserDirectory::new(Arc::clone(&api));
        dir.refresh().await.unwrap();
        (dir, api)
    }

    #[tokio::test]
    async fn test_create_resets_form_and_refetches() {
        let (mut dir, _api) = directory().await;
        dir.form_mut().name = "Grace".to_string();
        dir.form_mut().email = "grace@example.com".to_string();
        dir.form_mut().password = "cobol".to_string();

        let created = dir.submit().await.unwrap();
        assert_eq!(created.name, "Grace");
        assert_eq!(dir.users().len(), 2);
        assert_eq!(dir.form(), &UserForm::default());
    }

    #[tokio::test]
    async fn test_edit_updates_selected_user() {
        let (mut dir, api) = directory().await;
        let id = dir.users()[0].id;

        assert!(dir.begin_edit(id));
        assert_eq!(dir.mode(), FormMode::Edit(id));
        assert_eq!(dir.form().name, "Ada");
        dir.form_mut().name = "Ada L.".to_string();

        dir.submit().await.unwrap();
        assert_eq!(api.user(id).unwrap().name, "Ada L.");
        assert_eq!(dir.mode(), FormMode::Create);
        assert_eq!(dir.users()[0].name, "Ada L.");
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_request() {
        let (mut dir, api) = directory().await;
        dir.form_mut().name = "No email".to_string();
        let calls = api.calls();

        let err = dir.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(api.calls(), calls);
        assert_eq!(dir.form().name, "No email");
    }

    #[tokio::test]
    async fn test_delete_refetches_and_leaves_edit() {
        let (mut dir, api) = directory().await;
        let id = dir.users()[0].id;
        dir.begin_edit(id);

        dir.delete(id).await.unwrap();
        assert!(dir.users().is_empty());
        assert!(api.user(id).is_none());
        assert_eq!(dir.mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_user() {
        let (mut dir, _api) = directory().await;
        assert!(!dir.begin_edit(999));
        assert_eq!(dir.mode(), FormMode::Create);
    }
}
