//! Always-pass classifier for the tcx ingress hook
//!
//! `#[classifier]` always emits the `classifier` section, so the entry point
//! is declared by hand with the same shape the macro expands to, placed in
//! `tcx/ingress` instead.

#![cfg_attr(target_arch = "bpf", no_std)]
#![cfg_attr(target_arch = "bpf", no_main)]

use aya_ebpf::{
    bindings::{__sk_buff, tcx_action_base::TCX_PASS},
    programs::TcContext,
};
use tc_fixtures_common::{verdict, Hook};

const _: () = assert!(verdict::BPF_OK == TCX_PASS);

#[no_mangle]
#[link_section = "tcx/ingress"]
pub fn handle_ingress(ctx: *mut __sk_buff) -> i32 {
    let ctx = TcContext::new(ctx);
    tc_fixtures_common::handle_ingress(Hook::TcxIngress, &ctx)
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
