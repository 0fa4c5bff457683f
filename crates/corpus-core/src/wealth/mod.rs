//! Wealth growth from a lump sum plus a stepped-up monthly SIP.

pub mod sip;
