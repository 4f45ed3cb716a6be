//! Open game controllers.

use touchdeck_types::ControllerId;

use crate::error::SlotError;

/// Most controllers a session keeps open.
pub const MAX_CONTROLLERS: usize = 16;

/// Fixed-capacity table of open controllers, keyed by instance id.
#[derive(Debug, Default)]
pub struct ControllerSlots {
    slots: [Option<ControllerId>; MAX_CONTROLLERS],
}

impl ControllerSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: ControllerId) -> bool {
        self.slots.contains(&Some(id))
    }

    /// Store `id` in the first free slot, returning the slot index.
    pub fn insert(&mut self, id: ControllerId) -> Result<usize, SlotError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SlotError::CapacityExceeded)?;
        self.slots[index] = Some(id);
        Ok(index)
    }

    /// Free the slot holding `id`, returning its index.
    pub fn remove(&mut self, id: ControllerId) -> Result<usize, SlotError> {
        let index = self
            .slots
            .iter()
            .position(|s| *s == Some(id))
            .ok_or(SlotError::NotFound(id))?;
        self.slots[index] = None;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_up_to_capacity() {
        let mut slots = ControllerSlots::new();
        for i in 0..MAX_CONTROLLERS {
            let id = ControllerId(u32::try_from(i).unwrap());
            assert_eq!(slots.insert(id), Ok(i));
        }
        assert!(slots.is_full());
        assert_eq!(
            slots.insert(ControllerId(99)),
            Err(SlotError::CapacityExceeded)
        );
        assert_eq!(slots.len(), MAX_CONTROLLERS);
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut slots = ControllerSlots::new();
        slots.insert(ControllerId(1)).unwrap();
        slots.insert(ControllerId(2)).unwrap();
        assert_eq!(slots.remove(ControllerId(1)), Ok(0));
        assert!(!slots.contains(ControllerId(1)));
        assert_eq!(slots.insert(ControllerId(3)), Ok(0));
    }

    #[test]
    fn removing_unknown_is_not_found() {
        let mut slots = ControllerSlots::new();
        assert_eq!(
            slots.remove(ControllerId(7)),
            Err(SlotError::NotFound(ControllerId(7)))
        );
        assert!(slots.is_empty());
    }
}
