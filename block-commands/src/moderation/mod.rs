pub mod lockdown;
pub mod purge;
pub mod say;
pub mod slow;
pub mod unlock;
pub mod unslow;
