//! Benchmark driver utilities for the `dynconn` crate: action-stream IO, workload
//! generators and the measurement harness behind the `benchmark` binary.

pub mod bench_util;
pub mod generate;
pub mod io;
