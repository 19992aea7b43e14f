/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains exports for code useful for driving and checking
    clocked bus devices.

--*/
mod transcript;

pub use transcript::Transcript;
