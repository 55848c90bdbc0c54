use uuid::Uuid;

use crate::db::models::auth::AuthUser;

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl RequestContext {
    pub fn is_elevated(&self) -> bool {
        crate::permissions::has_elevated_role(self)
    }
}

impl From<&AuthUser> for RequestContext {
    fn from(user: &AuthUser) -> Self {
        Self {
            user_id: user.id,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}
