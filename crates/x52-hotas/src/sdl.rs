use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use sdl2::event::Event;
use sdl2::joystick::Joystick;
use sdl2::{EventPump, JoystickSubsystem, Sdl};

use crate::backend::{Backend, Device};
use crate::error::{Error, Result};
use crate::sample::RawEvent;
use crate::types::{Capabilities, DeviceIndex};

/// SDL joystick instance id.
type InstanceId = u32;

/// SDL2-backed joystick access.
///
/// SDL owns a single event pump per process, so the backend keeps it in a
/// router shared with every device it opens. Not `Send`: SDL must live
/// entirely within the thread that created it.
pub struct Sdl2Backend {
    joystick: JoystickSubsystem,
    router: Rc<RefCell<EventRouter>>,
    _sdl: Sdl,
}

impl Sdl2Backend {
    pub fn new() -> Result<Self> {
        // No window is ever created, keep events flowing regardless of focus.
        sdl2::hint::set("SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS", "1");

        let sdl = sdl2::init().map_err(Error::BackendInit)?;
        let joystick = sdl.joystick().map_err(Error::BackendInit)?;
        let pump = sdl.event_pump().map_err(Error::BackendInit)?;
        log::debug!("SDL2 joystick subsystem initialized");

        Ok(Self {
            joystick,
            router: Rc::new(RefCell::new(EventRouter {
                pump,
                queues: DeviceQueues::default(),
            })),
            _sdl: sdl,
        })
    }
}

impl Backend for Sdl2Backend {
    type Device = Sdl2Device;

    fn device_count(&self) -> Result<u32> {
        self.joystick.num_joysticks().map_err(Error::BackendInit)
    }

    fn open(&mut self, index: DeviceIndex) -> Result<Sdl2Device> {
        if index >= self.device_count()? {
            return Err(Error::DeviceNotFound(index));
        }
        let joystick = self.joystick.open(index).map_err(|e| Error::Open {
            index,
            message: e.to_string(),
        })?;
        let instance_id = joystick.instance_id();
        // SDL hands out the same instance for a second open of one joystick
        if !self
            .router
            .borrow_mut()
            .queues
            .claim(instance_id, current_state(&joystick))
        {
            return Err(Error::DeviceClaimed(index));
        }
        let name = joystick.name();
        log::debug!("opened joystick {index} ({name}) as instance {instance_id}");

        Ok(Sdl2Device {
            joystick,
            instance_id,
            name,
            router: Rc::clone(&self.router),
        })
    }

    fn device_name(&self, index: DeviceIndex) -> Result<String> {
        self.joystick
            .name_for_index(index)
            .map_err(|_| Error::DeviceNotFound(index))
    }
}

/// An open SDL joystick. Closed when dropped.
pub struct Sdl2Device {
    joystick: Joystick,
    instance_id: InstanceId,
    name: String,
    router: Rc<RefCell<EventRouter>>,
}

impl Device for Sdl2Device {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> Result<Capabilities> {
        Ok(Capabilities {
            axis_count: self.joystick.num_axes() as usize,
            button_count: self.joystick.num_buttons() as usize,
            hat_count: self.joystick.num_hats() as usize,
        })
    }

    fn drain(&mut self, out: &mut Vec<RawEvent>) {
        let mut router = self.router.borrow_mut();
        router.pump_events();
        router.queues.drain_into(self.instance_id, out);
    }
}

impl Drop for Sdl2Device {
    fn drop(&mut self) {
        if let Ok(mut router) = self.router.try_borrow_mut() {
            router.queues.release(self.instance_id);
        }
        log::debug!("closed joystick instance {}", self.instance_id);
    }
}

/// Demultiplexes the process-wide event stream into per-device queues.
struct EventRouter {
    pump: EventPump,
    queues: DeviceQueues,
}

impl EventRouter {
    /// Drains all pending SDL events without blocking.
    fn pump_events(&mut self) {
        let Self { pump, queues } = self;
        for event in pump.poll_iter() {
            let Some((which, raw)) = map_sdl_event(&event) else {
                if let Event::JoyDeviceRemoved { which, .. } = event {
                    if queues.is_claimed(which) {
                        log::warn!("joystick instance {which} was removed");
                    }
                }
                continue;
            };
            queues.push(which, raw);
        }
    }
}

/// Pending events of every open instance.
#[derive(Debug, Default)]
struct DeviceQueues(AHashMap<InstanceId, Vec<RawEvent>>);

impl DeviceQueues {
    /// Starts a queue for `id` holding `seed`. Returns false, leaving the
    /// existing queue alone, when `id` is already open.
    fn claim(&mut self, id: InstanceId, seed: Vec<RawEvent>) -> bool {
        if self.0.contains_key(&id) {
            return false;
        }
        self.0.insert(id, seed);
        true
    }

    fn release(&mut self, id: InstanceId) {
        self.0.remove(&id);
    }

    fn is_claimed(&self, id: InstanceId) -> bool {
        self.0.contains_key(&id)
    }

    /// Events for instances nobody opened are discarded.
    fn push(&mut self, id: InstanceId, event: RawEvent) {
        if let Some(queue) = self.0.get_mut(&id) {
            queue.push(event);
        }
    }

    fn drain_into(&mut self, id: InstanceId, out: &mut Vec<RawEvent>) {
        if let Some(queue) = self.0.get_mut(&id) {
            out.append(queue);
        }
    }
}

fn map_sdl_event(event: &Event) -> Option<(InstanceId, RawEvent)> {
    Some(match *event {
        Event::JoyAxisMotion {
            which,
            axis_idx,
            value,
            ..
        } => (
            which,
            RawEvent::Axis {
                index: usize::from(axis_idx),
                value: i32::from(value),
            },
        ),
        Event::JoyButtonDown {
            which, button_idx, ..
        } => (
            which,
            RawEvent::Button {
                index: usize::from(button_idx),
                pressed: true,
            },
        ),
        Event::JoyButtonUp {
            which, button_idx, ..
        } => (
            which,
            RawEvent::Button {
                index: usize::from(button_idx),
                pressed: false,
            },
        ),
        Event::JoyHatMotion {
            which,
            hat_idx,
            state,
            ..
        } => (
            which,
            RawEvent::Hat {
                index: usize::from(hat_idx),
                value: u32::from(state.to_raw()),
            },
        ),
        _ => return None,
    })
}

/// Events describing the joystick's state at the moment it was opened.
fn current_state(joystick: &Joystick) -> Vec<RawEvent> {
    let mut events = Vec::new();
    for i in 0..joystick.num_axes() {
        if let Ok(value) = joystick.axis(i) {
            events.push(RawEvent::Axis {
                index: i as usize,
                value: i32::from(value),
            });
        }
    }
    for i in 0..joystick.num_buttons() {
        if let Ok(pressed) = joystick.button(i) {
            events.push(RawEvent::Button {
                index: i as usize,
                pressed,
            });
        }
    }
    for i in 0..joystick.num_hats() {
        if let Ok(state) = joystick.hat(i) {
            events.push(RawEvent::Hat {
                index: i as usize,
                value: u32::from(state.to_raw()),
            });
        }
    }
    events
}
