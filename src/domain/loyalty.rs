/// How points are earned and what a reward is worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoyaltyPolicy {
    /// Points spent on one reward.
    pub reward_cost: u32,
    /// Coins discounted by one reward, capped at the subtotal.
    pub reward_value: f64,
}

impl Default for LoyaltyPolicy {
    fn default() -> Self {
        Self { reward_cost: 200, reward_value: 35.0 }
    }
}

/// Price breakdown of a cart at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub points_earned: u32,
    pub points_redeemed: u32,
}

impl LoyaltyPolicy {
    /// One point per whole coin paid.
    pub fn points_for(total: f64) -> u32 {
        if total.is_finite() && total > 0.0 {
            total.floor().min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }

    pub fn quote(&self, subtotal: f64, redeem_reward: bool) -> Quote {
        let (discount, points_redeemed) = if redeem_reward {
            (self.reward_value.min(subtotal), self.reward_cost)
        } else {
            (0.0, 0)
        };
        let total = (subtotal - discount).max(0.0);
        Quote {
            subtotal,
            discount,
            total,
            points_earned: Self::points_for(total),
            points_redeemed,
        }
    }

    /// Percent of the way to the next reward, 0 to 100.
    pub fn progress(&self, points: u32) -> f64 {
        if self.reward_cost == 0 {
            return 100.0;
        }
        (f64::from(points) / f64::from(self.reward_cost) * 100.0).min(100.0)
    }

    pub fn can_redeem(&self, points: u32) -> bool {
        points >= self.reward_cost
    }
}
