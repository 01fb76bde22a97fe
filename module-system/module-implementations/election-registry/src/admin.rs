use ballot_modules_api::{CallResponse, Context};
use ballot_state::WorkingSet;

use crate::{ElectionRegistry, RegistryError};

impl<C: Context> ElectionRegistry<C> {
    /// Grants admin rights. Adding an existing admin, the root admin included,
    /// succeeds with a notice.
    pub(crate) fn add_admin(
        &self,
        admin: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        self.ensure_admin(context, "add admins", working_set)?;

        if self.is_admin(&admin, working_set) {
            tracing::info!(%admin, "Address is already an admin");
            return Ok(CallResponse::noop(format!("{admin} is already an admin")));
        }

        self.admins.set(&admin, &true, working_set);
        working_set.add_event("Election: add_admin", &format!("Admin was added: {admin}"));

        Ok(CallResponse::default())
    }

    /// Revokes admin rights. The root admin is rejected before the caller is
    /// even checked.
    pub(crate) fn remove_admin(
        &self,
        admin: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, RegistryError> {
        if self.root_admin.get(working_set).as_ref() == Some(&admin) {
            return Err(RegistryError::InvalidOperation(
                "the root admin cannot be removed".to_owned(),
            ));
        }

        self.ensure_admin(context, "remove admins", working_set)?;

        if self.admins.remove(&admin, working_set).is_none() {
            tracing::info!(%admin, "Address is not an admin");
            return Ok(CallResponse::noop(format!("{admin} is not an admin")));
        }

        working_set.add_event(
            "Election: remove_admin",
            &format!("Admin was removed: {admin}"),
        );

        Ok(CallResponse::default())
    }

    /// Returns `true` for the root admin and every address in the admin set.
    pub fn is_admin(&self, address: &C::Address, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.root_admin.get(working_set).as_ref() == Some(address)
            || self.admins.get(address, working_set).is_some()
    }

    /// Returns the deployer address, once genesis ran.
    pub fn root_admin(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.root_admin.get(working_set)
    }

    pub(crate) fn ensure_admin(
        &self,
        context: &C,
        action: &str,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), RegistryError> {
        if self.is_admin(context.sender(), working_set) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized(format!(
                "only admins can {action}, {} is not an admin",
                context.sender()
            )))
        }
    }
}
