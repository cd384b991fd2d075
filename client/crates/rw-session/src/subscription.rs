/// Handle for a registered auth listener
pub trait Subscription: Send {
    /// Remove the listener. Implementations must tolerate repeated calls.
    fn unsubscribe(&mut self);
}

/// Owns a subscription and releases it exactly once: on `release()` or on drop
pub struct SubscriptionGuard {
    subscription: Option<Box<dyn Subscription>>,
}

impl SubscriptionGuard {
    pub fn new(subscription: Box<dyn Subscription>) -> Self {
        Self {
            subscription: Some(subscription),
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn release(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.release();
    }
}
