use log::debug;
use num_bigint::BigUint;
use std::sync::Arc;

use crate::error::{QuoteError, Result};
use crate::models::PoolDescriptor;
use crate::raydium::layout::{decode_token_account_amount, AmmLayout};
use crate::solana::{decode_account_data, parse_token_amount, SolanaClient, UiAccount};

/// Reads Raydium AMM v4 pools straight from chain state
pub struct RaydiumClient {
    client: Arc<SolanaClient>,
}

impl RaydiumClient {
    /// Create a new Raydium client
    pub fn new(client: Arc<SolanaClient>) -> Self {
        Self { client }
    }

    /// Load a pool from its account layout plus `getTokenAccountBalance` on both vaults
    pub async fn get_pool_info_onchain(&self, pool_address: &str) -> Result<PoolDescriptor> {
        let layout = self.fetch_layout(pool_address).await?;

        let base_reserve = self.vault_balance(&layout.base_vault).await?;
        let quote_reserve = self.vault_balance(&layout.quote_vault).await?;

        Self::descriptor(pool_address, layout, base_reserve, quote_reserve)
    }

    /// Load a pool from its account layout plus one `getMultipleAccounts` call for the vaults
    pub async fn get_pool_info(&self, pool_address: &str) -> Result<PoolDescriptor> {
        let layout = self.fetch_layout(pool_address).await?;

        let vaults = [layout.base_vault.clone(), layout.quote_vault.clone()];
        let accounts = self.client.get_multiple_accounts(&vaults).await?;

        let [base_account, quote_account]: [Option<UiAccount>; 2] =
            accounts.try_into().map_err(|accounts: Vec<Option<UiAccount>>| {
                QuoteError::malformed(
                    self.client.rpc_url(),
                    format!("expected 2 vault accounts, got {}", accounts.len()),
                )
            })?;

        let base_reserve = vault_amount(&layout.base_vault, base_account)?;
        let quote_reserve = vault_amount(&layout.quote_vault, quote_account)?;
        Self::descriptor(pool_address, layout, base_reserve, quote_reserve)
    }

    async fn fetch_layout(&self, pool_address: &str) -> Result<AmmLayout> {
        let account = self
            .client
            .get_account_info(pool_address)
            .await?
            .ok_or_else(|| QuoteError::AccountNotFound {
                address: pool_address.to_string(),
            })?;

        let data = decode_account_data(pool_address, &account)?;
        AmmLayout::decode(pool_address, &data)
    }

    async fn vault_balance(&self, vault: &str) -> Result<BigUint> {
        let balance = self.client.get_token_account_balance(vault).await?;
        debug!("Vault {} holds {} units", vault, balance.amount);
        parse_token_amount(&balance.amount)
    }

    fn descriptor(
        pool_address: &str,
        layout: AmmLayout,
        base_reserve: BigUint,
        quote_reserve: BigUint,
    ) -> Result<PoolDescriptor> {
        PoolDescriptor::new(
            pool_address,
            layout.base_mint,
            layout.quote_mint,
            base_reserve,
            quote_reserve,
            layout.base_decimals,
            layout.quote_decimals,
        )
    }
}

/// Raw `amount` of an SPL token account returned by `getMultipleAccounts`
fn vault_amount(address: &str, account: Option<UiAccount>) -> Result<BigUint> {
    let account = account.ok_or_else(|| QuoteError::AccountNotFound {
        address: address.to_string(),
    })?;
    let data = decode_account_data(address, &account)?;
    decode_token_account_amount(address, &data)
}
