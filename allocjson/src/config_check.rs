// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! Integer overflow handling is selected by exactly one feature.

#[cfg(not(any(feature = "int-overflow-double", feature = "int-overflow-fault")))]
compile_error!(
    "No integer overflow behavior selected: choose one of 'int-overflow-double' or 'int-overflow-fault'"
);

#[cfg(all(feature = "int-overflow-double", feature = "int-overflow-fault"))]
compile_error!(
    "Cannot enable both 'int-overflow-double' and 'int-overflow-fault' features simultaneously: \
     disable default features to select 'int-overflow-fault'"
);
