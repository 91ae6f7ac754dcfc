pub mod xterminate_icon;

pub use xterminate_icon::{
    cleanup_icons, inject_icon, register, AttachState, IconOptions, IconOptionsPatch, XterminateIcon,
};
