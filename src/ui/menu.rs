//! Reply keyboard labels decoded into commands
//!
//! Labels live only here; handlers match on [`MenuCommand`].

/// A reply keyboard button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    // User menu
    Categories,
    About,
    Contact,

    // Admin panel
    Users,
    ManageCategories,
    ManageStories,
    Settings,
    Statistics,
    UserMode,

    // Users submenu
    ListUsers,
    PendingRequests,
    DeleteUser,

    // Categories submenu
    ListCategories,
    AddCategory,
    DeleteCategory,

    // Stories submenu
    ListStories,
    AddStory,
    DeleteStory,

    // Settings submenu
    EditWelcome,
    EditAbout,
    EditContact,
    EditStartButton,
    AccessRules,
    SetChannel,

    Back,
    Cancel,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 26] = [
        MenuCommand::Categories,
        MenuCommand::About,
        MenuCommand::Contact,
        MenuCommand::Users,
        MenuCommand::ManageCategories,
        MenuCommand::ManageStories,
        MenuCommand::Settings,
        MenuCommand::Statistics,
        MenuCommand::UserMode,
        MenuCommand::ListUsers,
        MenuCommand::PendingRequests,
        MenuCommand::DeleteUser,
        MenuCommand::ListCategories,
        MenuCommand::AddCategory,
        MenuCommand::DeleteCategory,
        MenuCommand::ListStories,
        MenuCommand::AddStory,
        MenuCommand::DeleteStory,
        MenuCommand::EditWelcome,
        MenuCommand::EditAbout,
        MenuCommand::EditContact,
        MenuCommand::EditStartButton,
        MenuCommand::AccessRules,
        MenuCommand::SetChannel,
        MenuCommand::Back,
        MenuCommand::Cancel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::Categories => "📚 Categories",
            MenuCommand::About => "ℹ️ About",
            MenuCommand::Contact => "📞 Contact",
            MenuCommand::Users => "👥 Users",
            MenuCommand::ManageCategories => "📂 Manage categories",
            MenuCommand::ManageStories => "📝 Manage stories",
            MenuCommand::Settings => "⚙️ Settings",
            MenuCommand::Statistics => "📊 Statistics",
            MenuCommand::UserMode => "👤 User mode",
            MenuCommand::ListUsers => "📋 User list",
            MenuCommand::PendingRequests => "⏳ Pending requests",
            MenuCommand::DeleteUser => "🗑 Delete user",
            MenuCommand::ListCategories => "📋 Category list",
            MenuCommand::AddCategory => "➕ Add category",
            MenuCommand::DeleteCategory => "🗑 Delete category",
            MenuCommand::ListStories => "📋 Story list",
            MenuCommand::AddStory => "➕ Add story",
            MenuCommand::DeleteStory => "🗑 Delete story",
            MenuCommand::EditWelcome => "👋 Welcome message",
            MenuCommand::EditAbout => "ℹ️ About text",
            MenuCommand::EditContact => "📞 Contact text",
            MenuCommand::EditStartButton => "🚀 Start button",
            MenuCommand::AccessRules => "🔐 Access rules",
            MenuCommand::SetChannel => "📢 Channel",
            MenuCommand::Back => "🔙 Back",
            MenuCommand::Cancel => "❌ Cancel",
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.iter().copied().find(|command| command.label() == text)
    }

    /// Commands available to non-admin users
    pub fn is_user_command(&self) -> bool {
        matches!(self, MenuCommand::Categories | MenuCommand::About | MenuCommand::Contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_are_unique_and_decode() {
        let labels: HashSet<&str> = MenuCommand::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), MenuCommand::ALL.len());

        for command in MenuCommand::ALL {
            assert_eq!(MenuCommand::from_label(command.label()), Some(command));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(MenuCommand::from_label("hello"), None);
        assert_eq!(MenuCommand::from_label(" 📚 Categories "), Some(MenuCommand::Categories));
    }

    #[test]
    fn test_user_commands() {
        assert!(MenuCommand::About.is_user_command());
        assert!(!MenuCommand::DeleteUser.is_user_command());
    }
}
