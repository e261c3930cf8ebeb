//! Event types delivered to widgets.
//!
//! Pointer events carry two positions: `pos` is in window (screen-root)
//! coordinates and stays fixed for the lifetime of the event, while `local`
//! is recomputed for each widget the event is offered to during dispatch.

use trellis_core::{Vec2f, Vec2i};

// ============================================================================
// Buttons and modifiers
// ============================================================================

/// Mouse buttons. The discriminant doubles as the bit index in a
/// pressed-button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

impl MouseButton {
    /// Bit for this button in a button mask.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Keyboard modifier state captured alongside an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };
}

/// Logical keys. Only keys the toolkit itself reacts to get named variants;
/// everything else travels as `Other` with the platform scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Char(char),
    Other(u32),
}

// ============================================================================
// Event base
// ============================================================================

/// State common to every widget event.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    pub fn new() -> Self {
        Self { accepted: false }
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    #[inline]
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

// ============================================================================
// Pointer events
// ============================================================================

#[derive(Debug, Clone)]
pub struct MousePressEvent {
    pub base: EventBase,
    pub button: MouseButton,
    /// Position in window coordinates.
    pub pos: Vec2i,
    /// Position relative to the widget currently being offered the event.
    pub local: Vec2i,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct MouseReleaseEvent {
    pub base: EventBase,
    pub button: MouseButton,
    pub pos: Vec2i,
    pub local: Vec2i,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct MouseMoveEvent {
    pub base: EventBase,
    pub pos: Vec2i,
    pub local: Vec2i,
    /// Motion since the previous pointer position.
    pub delta: Vec2i,
    /// Mask of currently held buttons.
    pub buttons: u8,
    pub modifiers: Modifiers,
}

/// Delivered directly to the drag-captured widget while a button is held.
#[derive(Debug, Clone)]
pub struct MouseDragEvent {
    pub base: EventBase,
    pub pos: Vec2i,
    pub delta: Vec2i,
    /// Mask of currently held buttons.
    pub buttons: u8,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct WheelEvent {
    pub base: EventBase,
    pub pos: Vec2i,
    pub local: Vec2i,
    pub delta: Vec2f,
    pub modifiers: Modifiers,
}

// ============================================================================
// Keyboard events
// ============================================================================

#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub base: EventBase,
    pub key: Key,
    pub pressed: bool,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct CharEvent {
    pub base: EventBase,
    pub codepoint: char,
}

// ============================================================================
// Focus and hover events
// ============================================================================

#[derive(Debug, Clone)]
pub struct FocusInEvent {
    pub base: EventBase,
}

#[derive(Debug, Clone)]
pub struct FocusOutEvent {
    pub base: EventBase,
}

#[derive(Debug, Clone)]
pub struct EnterEvent {
    pub base: EventBase,
    pub pos: Vec2i,
}

#[derive(Debug, Clone)]
pub struct LeaveEvent {
    pub base: EventBase,
}

// ============================================================================
// Unified event
// ============================================================================

/// All events a widget can receive, as a single dispatchable value.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    MousePress(MousePressEvent),
    MouseRelease(MouseReleaseEvent),
    MouseMove(MouseMoveEvent),
    MouseDrag(MouseDragEvent),
    Wheel(WheelEvent),
    Key(KeyEvent),
    Char(CharEvent),
    FocusIn(FocusInEvent),
    FocusOut(FocusOutEvent),
    Enter(EnterEvent),
    Leave(LeaveEvent),
}

impl WidgetEvent {
    pub fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::MouseMove(e) => &e.base,
            Self::MouseDrag(e) => &e.base,
            Self::Wheel(e) => &e.base,
            Self::Key(e) => &e.base,
            Self::Char(e) => &e.base,
            Self::FocusIn(e) => &e.base,
            Self::FocusOut(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::MouseMove(e) => &mut e.base,
            Self::MouseDrag(e) => &mut e.base,
            Self::Wheel(e) => &mut e.base,
            Self::Key(e) => &mut e.base,
            Self::Char(e) => &mut e.base,
            Self::FocusIn(e) => &mut e.base,
            Self::FocusOut(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
        }
    }

    /// Whether an unhandled event continues up the parent chain.
    /// Focus and hover notifications are targeted and never bubble.
    pub fn propagates(&self) -> bool {
        !matches!(
            self,
            Self::FocusIn(_) | Self::FocusOut(_) | Self::Enter(_) | Self::Leave(_)
        )
    }

    /// Window-space position for positional events.
    pub fn pos(&self) -> Option<Vec2i> {
        match self {
            Self::MousePress(e) => Some(e.pos),
            Self::MouseRelease(e) => Some(e.pos),
            Self::MouseMove(e) => Some(e.pos),
            Self::MouseDrag(e) => Some(e.pos),
            Self::Wheel(e) => Some(e.pos),
            Self::Enter(e) => Some(e.pos),
            _ => None,
        }
    }

    /// Updates the widget-relative position for the current dispatch target.
    pub(crate) fn set_local(&mut self, local: Vec2i) {
        match self {
            Self::MousePress(e) => e.local = local,
            Self::MouseRelease(e) => e.local = local,
            Self::MouseMove(e) => e.local = local,
            Self::Wheel(e) => e.local = local,
            _ => {}
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MousePress(_) => "mouse-press",
            Self::MouseRelease(_) => "mouse-release",
            Self::MouseMove(_) => "mouse-move",
            Self::MouseDrag(_) => "mouse-drag",
            Self::Wheel(_) => "wheel",
            Self::Key(_) => "key",
            Self::Char(_) => "char",
            Self::FocusIn(_) => "focus-in",
            Self::FocusOut(_) => "focus-out",
            Self::Enter(_) => "enter",
            Self::Leave(_) => "leave",
        }
    }
}

/// A platform-facing input event, before hit testing and routing.
///
/// The embedder translates whatever its windowing layer produces into these
/// and feeds them to [`Screen::dispatch`](crate::Screen::dispatch).
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerButton {
        pos: Vec2i,
        button: MouseButton,
        pressed: bool,
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Vec2i,
        modifiers: Modifiers,
    },
    Scroll {
        pos: Vec2i,
        delta: Vec2f,
        modifiers: Modifiers,
    },
    Key {
        key: Key,
        pressed: bool,
        modifiers: Modifiers,
    },
    Char {
        codepoint: char,
    },
}
