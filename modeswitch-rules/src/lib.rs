//! Turn a `usb_modeswitch` device configuration into udev rules.
//!
//! The configuration file (`/etc/usb_modeswitch.conf`) is a sequence of
//! device blocks, each introduced by a `####` banner comment and holding
//! `;Key=value` declarations. Every block that declares both
//! `DefaultVendor` and `DefaultProduct` becomes one udev rule that runs
//! the mode-switch utility when the matching device appears. When two
//! blocks claim the same vendor:product pair, only the first rule stays
//! active; later ones are emitted commented out so an administrator can
//! swap them in by hand.
//!
//! Modules:
//! - [`options`]: the fixed key to command-line option mapping.
//! - [`emit`]: rule construction and the rules-file renderer.
//! - [`check`]: configuration lint producing a severity-tagged report.
//! - [`inspect`]: human-readable dump of the parsed block structure.
//! - [`report`]: terminal coloring for check output.
//! - [`summary`]: one-line outcome summary for file generation.
//!
//! Parsing itself lives in the `blockconf-core` crate; this crate only
//! interprets the parsed blocks.

pub mod check;
pub mod emit;
pub mod inspect;
pub mod options;
pub mod report;
pub mod summary;
