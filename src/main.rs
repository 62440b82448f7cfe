// Native test builds compile the state modules without the wasm glue that calls them.
#![cfg_attr(all(test, not(target_arch = "wasm32")), allow(dead_code))]

#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod contact;
#[cfg(any(target_arch = "wasm32", test))]
mod glow;
#[cfg(any(target_arch = "wasm32", test))]
mod log;
#[cfg(any(target_arch = "wasm32", test))]
mod nav;
#[cfg(any(target_arch = "wasm32", test))]
mod particles;
#[cfg(any(target_arch = "wasm32", test))]
mod skills;
#[cfg(any(target_arch = "wasm32", test))]
mod theme;
#[cfg(any(target_arch = "wasm32", test))]
mod typing;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate only runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
