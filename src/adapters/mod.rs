//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter          | Implements          | Connects to                 |
//! |------------------|---------------------|-----------------------------|
//! | `digital_inputs` | DigitalInputPort    | `embedded-hal` input pins   |
//! | `framebuffer`    | DisplayPort         | In-memory 128x64 buffer     |
//! | `log_sink`       | EventSink           | `log` facade                |
//! | `sim`            | AnalogInputPort     | Simulated module            |
//! |                  | DacPort             |                             |
//! |                  | DigitalInputPort    |                             |
//! |                  | FrequencyCapturePort|                             |
//! |                  | TickSource          |                             |

pub mod digital_inputs;
pub mod framebuffer;
pub mod log_sink;
pub mod sim;
