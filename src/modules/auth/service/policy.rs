use crate::modules::account::repository::Role;

// USER sessions are epoch-gated to a single live device; a new login
// supersedes every earlier one. INTERPRETER and ADMIN sessions stand on
// their own refresh-token records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DevicePolicy {
    SingleDevice,
    MultiDevice,
}

pub fn for_role(role: Role) -> DevicePolicy {
    match role {
        Role::User => DevicePolicy::SingleDevice,
        Role::Interpreter | Role::Admin => DevicePolicy::MultiDevice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_are_single_device() {
        assert_eq!(for_role(Role::User), DevicePolicy::SingleDevice);
    }

    #[test]
    fn interpreters_and_admins_are_multi_device() {
        assert_eq!(for_role(Role::Interpreter), DevicePolicy::MultiDevice);
        assert_eq!(for_role(Role::Admin), DevicePolicy::MultiDevice);
    }
}
