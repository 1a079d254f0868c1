// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use deploy::{
    deploy, estimate_gas, DeployOutcome, DeploymentBackend, GasEstimate, RpcBackend,
    MISSING_HANDLE_MESSAGE,
};

mod deploy;
