// CONTROLLER: Input handling, spin state machine and the frame loop
pub mod input;
pub mod rotation_controller;
pub mod highlight;
pub mod session;
pub mod frame_loop;
pub mod scroll;
pub mod nav;
pub mod form;

pub use input::{InputSource, SpinInput};
pub use rotation_controller::{RotationController, SpinObserver, SpinTransition};
pub use highlight::TouchHighlight;
pub use session::{SpinPresenter, SpinSession};
pub use frame_loop::FrameClock;
#[cfg(target_arch = "wasm32")]
pub use frame_loop::AnimationLoop;
pub use scroll::{ScrollState, SectionBounds};
pub use nav::NavMenu;
pub use form::{FormMessage, SubmitButton};
