mod kanban_board;
mod kanban_card;
mod kanban_card_meta;
mod kanban_column;
mod loading_overlay;
mod new_task_form;
mod task_modal;
mod theme_toggle;
mod toast_stack;

pub use kanban_board::KanbanBoard;
pub use kanban_card::KanbanCard;
pub use kanban_card_meta::KanbanCardMeta;
pub use kanban_column::KanbanColumn;
pub use loading_overlay::LoadingOverlay;
pub use new_task_form::NewTaskForm;
pub use task_modal::{
  FormEdit,
  TaskModal
};
pub use theme_toggle::ThemeToggle;
pub use toast_stack::ToastStack;
