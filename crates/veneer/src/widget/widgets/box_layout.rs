//! Linear stacking containers.
//!
//! [`HBox`] lays children out left to right, [`VBox`] top to bottom.
//! Children added with [`Container::add_widget`] keep their natural size;
//! [`add_widget_stretch`](HBox::add_widget_stretch) lets a child take a
//! share of the extra space.

use std::sync::Arc;

use crate::backend::{Backend, NativeKind, Packing, PropValue, Property};
use crate::error::Result;
use crate::widget::{Container, Orientation, Widget, WidgetBase, attach_child, impl_widget};

fn pack_linear(base: &WidgetBase, child: &Arc<dyn Widget>, stretch: bool) -> Result<()> {
    base.backend().pack(
        base.native_id(),
        child.native_id(),
        Packing::Linear {
            expand: stretch,
            fill: true,
        },
    )?;
    Ok(())
}

macro_rules! linear_box {
    ($(#[$meta:meta])* $name:ident, $orientation:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            base: Arc<WidgetBase>,
        }

        impl $name {
            /// Create an empty box.
            pub fn new(backend: &Backend) -> Self {
                Self {
                    base: WidgetBase::new(backend, NativeKind::Box($orientation), stringify!($name)),
                }
            }

            /// Add a child, letting it grow into extra space if `stretch`.
            pub fn add_widget_stretch<W: Widget + Clone>(&self, child: &W, stretch: bool) -> Result<()> {
                attach_child(self, Arc::new(child.clone()), |child| {
                    pack_linear(&self.base, child, stretch)
                })
            }

            /// Set the gap between children, in pixels.
            pub fn set_spacing(&self, pixels: u32) -> Result<()> {
                self.base.set(Property::Spacing, PropValue::Int(i64::from(pixels)))
            }

            /// The direction children are stacked in.
            pub fn orientation(&self) -> Orientation {
                $orientation
            }
        }

        impl_widget!($name, base);

        impl Container for $name {
            fn pack_child(&self, child: &Arc<dyn Widget>) -> Result<()> {
                pack_linear(&self.base, child, false)
            }
        }
    };
}

linear_box!(
    /// A horizontal stack of children.
    HBox,
    Orientation::Horizontal
);

linear_box!(
    /// A vertical stack of children.
    VBox,
    Orientation::Vertical
);
