// Platform-facing integrations
// The landmark detector lives outside this crate; only its bridge is defined here.

pub mod pose;
