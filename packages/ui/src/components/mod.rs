//! Small presentational building blocks shared by every view.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::{FieldError, Input, Label, PasswordInput, Select, Textarea};

mod dialog;
pub use dialog::Dialog;

mod feedback;
pub use feedback::{Alert, AlertKind, Card, PriorityBadge};
