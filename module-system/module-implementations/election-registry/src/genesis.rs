use anyhow::Result;
use ballot_modules_api::Context;
use ballot_state::WorkingSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ElectionRegistry;

/// Initial state of the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "C::Address: Serialize + DeserializeOwned")]
pub struct ElectionRegistryConfig<C: Context> {
    /// The deployer. It is an admin forever.
    pub root_admin: C::Address,
    /// Additional admins, removable later.
    #[serde(default)]
    pub admins: Vec<C::Address>,
}

impl<C: Context> ElectionRegistry<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as ballot_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        anyhow::ensure!(
            self.root_admin.get(working_set).is_none(),
            "Election registry is already initialized"
        );

        self.root_admin.set(&config.root_admin, working_set);

        for admin in config.admins.iter() {
            if admin != &config.root_admin {
                self.admins.set(admin, &true, working_set);
            }
        }

        tracing::info!(
            root_admin = %config.root_admin,
            admins = config.admins.len(),
            "Election registry initialized"
        );
        Ok(())
    }
}
