//! Always-pass classifier for the legacy tc ingress hook
//!
//! The entry point lands in the `classifier` section, which is what
//! `tc filter add ... bpf obj dummy_bpf.o sec classifier` expects.
//!
//! Note: This binary must be built for the bpfel-unknown-none target.
//! The root crate's build.rs handles the cross-compilation.

#![cfg_attr(target_arch = "bpf", no_std)]
#![cfg_attr(target_arch = "bpf", no_main)]

use aya_ebpf::{bindings::TC_ACT_OK, macros::classifier, programs::TcContext};
use tc_fixtures_common::{verdict, Hook};

const _: () = assert!(verdict::TC_ACT_OK == TC_ACT_OK);

#[classifier]
pub fn handle_ingress(ctx: TcContext) -> i32 {
    tc_fixtures_common::handle_ingress(Hook::Classifier, &ctx)
}

#[no_mangle]
#[link_section = "license"]
pub static LICENSE: [u8; 4] = tc_fixtures_common::LICENSE;

#[cfg(target_arch = "bpf")]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

#[cfg(not(target_arch = "bpf"))]
fn main() {}
