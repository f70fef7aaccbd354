/*!
# GpuWard - OpenGL Device Backend

OpenGL 4.6 implementation of the GpuWard `Device` trait, using the `gl` crate
for function loading and bindings.

The context itself is created by the windowing layer. Once it is current,
load the entry points and hand the device to a GpuWard context:

```no_run
use gpu_ward::ward::{Context, Config};
use gpu_ward_device_gl::GlDevice;

# fn loader(_: &str) -> *const std::ffi::c_void { std::ptr::null() }
let device = unsafe { GlDevice::load_with(loader) }?;
let ctx = Context::new(device, Config::default());
# Ok::<(), gpu_ward::ward::Error>(())
```

With the `object-labels` feature every created object is labelled through
KHR_debug, which makes the names show up in graphics debuggers.
*/

mod gl_device;
pub mod gl_enums;

pub use gl_device::GlDevice;
