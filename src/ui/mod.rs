//! Ostap UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK (child webviews need X11)
//! - macOS: WKWebView
//!
//! The chrome (sidebar, address bar, new-tab page) is one full-window WebView.
//! Each tab's page is a child WebView placed over the chrome's content region.
//! Both talk to the shell through wry IPC and the tao event loop proxy.

pub mod webview_app;
pub mod webview_host;
