use serde::Serialize;
use utxo_types::PoolId;

/// Per reward-account staking state.
///
/// Registration and delegation are seeded at construction and never change;
/// only withdrawals touch an account afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StakeAccount {
    pub registered: bool,
    pub delegated_pool: Option<PoolId>,
    /// Reward balance. Signed: withdrawals are not floored at zero.
    pub rewards: i128,
}

impl StakeAccount {
    /// A registered, undelegated account holding `rewards`.
    pub fn registered(rewards: u64) -> Self {
        Self {
            registered: true,
            delegated_pool: None,
            rewards: i128::from(rewards),
        }
    }

    pub fn delegated_to(mut self, pool: PoolId) -> Self {
        self.delegated_pool = Some(pool);
        self
    }

    /// Subtract `amount` from the reward balance, unguarded.
    pub fn withdraw(&mut self, amount: u64) {
        self.rewards -= i128::from(amount);
    }

    pub fn is_overdrawn(&self) -> bool {
        self.rewards < 0
    }
}
