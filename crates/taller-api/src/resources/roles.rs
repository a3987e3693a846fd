// Role endpoints: plain CRUD only.

pub const ROLES: &str = "api/Rol";
