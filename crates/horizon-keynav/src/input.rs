//! Input-capability queries and directional binding installation.
//!
//! Which physical keys drive navigation is owned by the surrounding
//! application and its input-device abstraction. This module only answers
//! the two questions the navigator's glue needs: does directional focus
//! apply at all, and which directions should get bindings on this device.

/// Capability query for the active input device.
pub trait InputCapabilities {
    /// Whether the device has a directional pad.
    fn has_directional_pad(&self) -> bool;

    /// Whether the device has few physical keys.
    fn has_few_keys(&self) -> bool;

    /// Whether the current input modality uses directional (non-pointer)
    /// focus at all.
    fn uses_directional_focus(&self) -> bool {
        self.has_directional_pad() || self.has_few_keys()
    }
}

/// An abstract navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward lower row indices.
    Up,
    /// Toward higher row indices.
    Down,
    /// Toward lower column indices.
    Left,
    /// Toward higher column indices.
    Right,
}

impl Direction {
    /// All four directions, in binding-installation order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The unit displacement for this direction. Row indices grow
    /// downward.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// The directions a container should install move bindings for.
///
/// Pointer-only devices get none: directional focus does not apply and
/// every input falls through to pointer handling. Devices with few physical
/// keys drop Up, since wrap-around already makes every row reachable with
/// Down alone.
pub fn directional_bindings(caps: &dyn InputCapabilities) -> Vec<Direction> {
    if !caps.uses_directional_focus() {
        return Vec::new();
    }
    if caps.has_few_keys() {
        Direction::ALL
            .iter()
            .copied()
            .filter(|direction| *direction != Direction::Up)
            .collect()
    } else {
        Direction::ALL.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Caps {
        dpad: bool,
        few_keys: bool,
    }

    impl InputCapabilities for Caps {
        fn has_directional_pad(&self) -> bool {
            self.dpad
        }

        fn has_few_keys(&self) -> bool {
            self.few_keys
        }
    }

    #[test]
    fn pointer_only_devices_install_nothing() {
        let caps = Caps {
            dpad: false,
            few_keys: false,
        };
        assert!(directional_bindings(&caps).is_empty());
        assert!(!caps.uses_directional_focus());
    }

    #[test]
    fn dpad_devices_install_all_directions() {
        let caps = Caps {
            dpad: true,
            few_keys: false,
        };
        assert_eq!(directional_bindings(&caps), Direction::ALL.to_vec());
    }

    #[test]
    fn few_key_devices_drop_up() {
        let caps = Caps {
            dpad: false,
            few_keys: true,
        };
        let bindings = directional_bindings(&caps);
        assert!(!bindings.contains(&Direction::Up));
        assert_eq!(bindings.len(), 3);
    }

    #[test]
    fn deltas_are_unit_displacements() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }
}
