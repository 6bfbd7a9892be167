//! Default user-visible texts

pub const PENDING_REVIEW: &str = "⏳ Your request has been sent to the admin. You will be notified once it is reviewed.";
pub const STILL_UNDER_REVIEW: &str = "⏳ Your request is still under review. Please wait for the admin's decision.";
pub const APPROVED: &str = "✅ Your request has been approved! Welcome aboard.";
pub const APPROVED_PREMIUM: &str = "🌟 Your request has been approved with premium access! Welcome aboard.";
pub const REJECTED: &str = "❌ Sorry, your request has been rejected.";
pub const SUBSCRIBE_FIRST: &str = "📢 Please subscribe to our channel to continue, then press \"Check subscription\".";
pub const NOT_SUBSCRIBED_YET: &str = "❌ You are not subscribed yet. Join the channel and try again.";
pub const SUBSCRIPTION_CONFIRMED: &str = "✅ Subscription confirmed. Enjoy the stories!";
pub const NO_PERMISSION: &str = "⛔ You don't have permission to do that.";
pub const ALREADY_RESOLVED: &str = "ℹ️ This request has already been handled.";
pub const UNKNOWN_COMMAND: &str = "🤔 Please use the menu buttons.";
pub const HELP: &str = "Use the menu buttons to browse story categories.\n\n/start - open the main menu\n/help - show this message\n/admin - admin panel\n/cancel - cancel the current action";
pub const ERROR: &str = "⚠️ Something went wrong. Please try again.";

pub const CHOOSE_CATEGORY: &str = "📂 Choose a category:";
pub const NO_CATEGORIES: &str = "📂 There are no categories yet.";
pub const NO_STORIES: &str = "📭 This category has no stories yet.";
pub const STORY_NOT_FOUND: &str = "❓ This story is no longer available.";
pub const PREMIUM_ONLY: &str = "🌟 This story is available to premium members only.";

pub const ADMIN_PANEL: &str = "🛠 Admin panel";
pub const CANCELLED: &str = "↩️ Cancelled.";
pub const ENTER_CATEGORY_NAME: &str = "✏️ Send the name of the new category:";
pub const ENTER_STORY_TITLE: &str = "✏️ Send the story title:";
pub const ENTER_STORY_CONTENT: &str = "✏️ Send the story text:";
pub const PICK_STORY_CATEGORY: &str = "📂 Choose the story category:";
pub const ASK_PREMIUM: &str = "🌟 Is this a premium story?";
pub const ENTER_USER_ID: &str = "🔢 Send the numeric id of the user to delete:";
pub const ENTER_CHANNEL: &str = "📢 Send the channel username (@channel) or numeric id:";
pub const ENTER_SETTING_TEXT: &str = "✏️ Send the new text:";
pub const INVALID_USER_ID: &str = "❌ That is not a valid user id. Send digits only, or /cancel.";
pub const INVALID_CHANNEL: &str = "❌ Invalid channel. Use @channel_name or a numeric id, or /cancel.";
pub const EMPTY_INPUT: &str = "❌ The value cannot be empty. Try again, or /cancel.";
pub const CATEGORY_EXISTS: &str = "❌ A category with that name already exists.";
pub const NEED_CATEGORY_FIRST: &str = "📂 Create a category before adding stories.";
pub const NO_PENDING_REQUESTS: &str = "📭 No pending requests.";
pub const NO_USERS: &str = "👥 No approved users yet.";
pub const SETTING_SAVED: &str = "✅ Setting saved.";

pub const DEFAULT_WELCOME: &str = "👋 Welcome to the story bot!";
pub const DEFAULT_ABOUT: &str = "ℹ️ A collection of stories sorted by category.";
pub const DEFAULT_CONTACT: &str = "📞 Contact the admin for any questions.";
pub const DEFAULT_START_BUTTON: &str = "🚀 Start";
