pub mod store_const {
    pub const USER_TABLE: &str = "users";
    pub const ORGANIZATION_TABLE: &str = "organizations";
    pub const ORGANIZATION_MEMBERSHIP_TABLE: &str = "organization_memberships";
    pub const ORGANIZATION_TAG_TABLE: &str = "organization_tags";
    pub const USER_TAG_TABLE: &str = "user_tags";
}

pub mod invite_const {
    pub const ACCEPT_INVITE_PATH: &str = "/settings/accept-invite";
    pub const EDITOR_BETA_TAG: &str = "editor-beta";
}
