//! 基础设施层
//!
//! - `dom`：渲染与查询能力的 trait（Scope / Renderer / Session / Launcher）
//! - `html`：基于 `scraper` 的静态 HTML 文档
//! - `fixture`：不启动浏览器的内存会话

pub mod dom;
pub mod fixture;
pub mod html;

pub use dom::{Launcher, Renderer, Scope, Session};
pub use fixture::{FixtureLauncher, FixturePage, FixtureSession};
pub use html::{HtmlDocument, HtmlElement};
