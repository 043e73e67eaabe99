//! Fixed-capacity slot pool

use openpad_device_types::DeviceIdentity;

use crate::RegistryError;
use crate::controller::Controller;

/// Hard cap on simultaneously managed devices.
pub const MAX_CONTROLLERS: usize = 4;

/// Generation-checked handle to one slot.
///
/// Stale ids (held across a release) fail the generation check and read as
/// absent rather than aliasing the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl core::fmt::Display for SlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}g{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    controller: Option<Controller>,
}

/// The controller arena: `MAX_CONTROLLERS` interchangeable slots.
///
/// All mutation happens on the bridge worker; injection only reads. The
/// pool itself is not synchronized.
#[derive(Debug)]
pub struct ControllerRegistry {
    slots: [Slot; MAX_CONTROLLERS],
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::default()),
        }
    }

    pub const fn capacity(&self) -> usize {
        MAX_CONTROLLERS
    }

    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.controller.is_some())
            .count()
    }

    /// Place a controller in the first free slot.
    pub fn allocate(&mut self, controller: Controller) -> Result<SlotId, RegistryError> {
        let free = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.controller.is_none());
        match free {
            Some((index, slot)) => {
                slot.controller = Some(controller);
                Ok(SlotId {
                    index,
                    generation: slot.generation,
                })
            }
            None => Err(RegistryError::Exhausted {
                capacity: MAX_CONTROLLERS,
            }),
        }
    }

    /// Take the controller out of a slot, bumping the generation so stale
    /// ids cannot see the slot's next occupant.
    pub fn release(&mut self, id: SlotId) -> Option<Controller> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let controller = slot.controller.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        Some(controller)
    }

    pub fn get(&self, id: SlotId) -> Option<&Controller> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.controller.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Controller> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.controller.as_mut()
    }

    /// Look a live device up by transport identity.
    pub fn find(&self, identity: DeviceIdentity) -> Option<SlotId> {
        self.live()
            .find(|(_, controller)| controller.identity == identity)
            .map(|(id, _)| id)
    }

    /// Read a slot by raw index, ignoring generations. Injection-side
    /// lookups go through ports, not retained ids.
    pub fn by_index(&self, index: usize) -> Option<&Controller> {
        self.slots.get(index)?.controller.as_ref()
    }

    /// Injection-side port mapping: logical port 0 shares slot 0 with
    /// logical port 1; ports 1 and up map to slot `port - 1`.
    pub fn port_controller(&self, port: usize) -> Option<&Controller> {
        self.by_index(port.saturating_sub(1))
    }

    /// Iterate live slots in index order.
    pub fn live(&self) -> impl Iterator<Item = (SlotId, &Controller)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.controller.as_ref().map(|controller| {
                (
                    SlotId {
                        index,
                        generation: slot.generation,
                    },
                    controller,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;

    fn make_controller(serial: u32) -> Controller {
        Controller::new(DeviceIdentity::new(0xF00D, serial), 0x2DC8, 0x5112, Decoder::Lite2)
    }

    #[test]
    fn test_allocate_up_to_capacity_then_exhausted() {
        let mut registry = ControllerRegistry::new();
        let mut ids = Vec::new();
        for serial in 0..4 {
            let result = registry.allocate(make_controller(serial));
            assert!(result.is_ok());
            if let Ok(id) = result {
                ids.push(id);
            }
        }
        assert_eq!(registry.live_count(), 4);

        let fifth = registry.allocate(make_controller(99));
        assert_eq!(fifth, Err(RegistryError::Exhausted { capacity: 4 }));
        // Existing slots are untouched by the failed allocation.
        assert_eq!(registry.live_count(), 4);
        for (serial, id) in ids.iter().enumerate() {
            let controller = registry.get(*id);
            assert!(controller.is_some());
            if let Some(controller) = controller {
                assert_eq!(controller.identity.lsb, serial as u32);
            }
        }
    }

    #[test]
    fn test_release_returns_controller_and_frees_slot() {
        let mut registry = ControllerRegistry::new();
        let result = registry.allocate(make_controller(7));
        assert!(result.is_ok());
        if let Ok(id) = result {
            let released = registry.release(id);
            assert!(released.is_some());
            if let Some(controller) = released {
                assert_eq!(controller.identity.lsb, 7);
            }
            assert_eq!(registry.live_count(), 0);
            // Double release is a no-op.
            assert!(registry.release(id).is_none());
        }
    }

    #[test]
    fn test_stale_id_cannot_see_successor() {
        let mut registry = ControllerRegistry::new();
        let first = registry.allocate(make_controller(1));
        assert!(first.is_ok());
        if let Ok(stale) = first {
            registry.release(stale);
            let second = registry.allocate(make_controller(2));
            assert!(second.is_ok());
            if let Ok(fresh) = second {
                // Same slot, new generation.
                assert_eq!(fresh.index(), stale.index());
                assert_ne!(fresh, stale);
                assert!(registry.get(stale).is_none());
                assert!(registry.get_mut(stale).is_none());
                assert!(registry.get(fresh).is_some());
            }
        }
    }

    #[test]
    fn test_find_by_identity() {
        let mut registry = ControllerRegistry::new();
        let a = registry.allocate(make_controller(10));
        let b = registry.allocate(make_controller(20));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(registry.find(DeviceIdentity::new(0xF00D, 20)), b.ok());
        assert_eq!(registry.find(DeviceIdentity::new(0xF00D, 10)), a.ok());
        assert_eq!(registry.find(DeviceIdentity::new(0xF00D, 30)), None);
    }

    #[test]
    fn test_port_mapping_front_port_shares_slot_zero() {
        let mut registry = ControllerRegistry::new();
        let _ = registry.allocate(make_controller(1));
        let _ = registry.allocate(make_controller(2));

        let port0 = registry.port_controller(0).map(|c| c.identity.lsb);
        let port1 = registry.port_controller(1).map(|c| c.identity.lsb);
        let port2 = registry.port_controller(2).map(|c| c.identity.lsb);
        assert_eq!(port0, Some(1));
        assert_eq!(port1, Some(1));
        assert_eq!(port2, Some(2));
        assert!(registry.port_controller(3).is_none());
        assert!(registry.port_controller(9).is_none());
    }

    #[test]
    fn test_live_iterates_in_index_order() {
        let mut registry = ControllerRegistry::new();
        let a = registry.allocate(make_controller(1));
        let b = registry.allocate(make_controller(2));
        let c = registry.allocate(make_controller(3));
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        if let Ok(middle) = b {
            registry.release(middle);
        }
        let live: Vec<u32> = registry.live().map(|(_, c)| c.identity.lsb).collect();
        assert_eq!(live, vec![1, 3]);
    }
}
