use plainhttpd::mime::DEFAULT_MIME_TYPE;
use plainhttpd::mime_type;
use std::path::Path;

#[cfg(test)]
mod mime_type_tests {
    use super::*;

    #[test]
    fn test_html_mime_types() {
        assert_eq!(mime_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(mime_type(Path::new("page.htm")), "text/html; charset=utf-8");
        assert_eq!(mime_type(Path::new("INDEX.HTML")), "text/html; charset=utf-8");
    }

    #[test]
    fn test_text_mime_types() {
        assert_eq!(mime_type(Path::new("style.css")), "text/css; charset=utf-8");
        assert_eq!(mime_type(Path::new("app.js")), "text/javascript; charset=utf-8");
        assert_eq!(mime_type(Path::new("module.mjs")), "text/javascript; charset=utf-8");
        assert_eq!(mime_type(Path::new("readme.txt")), "text/plain; charset=utf-8");
        assert_eq!(mime_type(Path::new("data.json")), "application/json; charset=utf-8");
    }

    #[test]
    fn test_binary_mime_types() {
        assert_eq!(mime_type(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(mime_type(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(mime_type(Path::new("font.woff2")), "font/woff2");
        assert_eq!(mime_type(Path::new("app.wasm")), "application/wasm");
        assert_eq!(mime_type(Path::new("doc.pdf")), "application/pdf");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(mime_type(Path::new("Dockerfile")), DEFAULT_MIME_TYPE);
        assert_eq!(mime_type(Path::new("data.xyz")), DEFAULT_MIME_TYPE);
        assert_eq!(mime_type(Path::new(".hidden")), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_path_with_directories() {
        assert_eq!(mime_type(Path::new("/www/css/main.css")), "text/css; charset=utf-8");
        assert_eq!(mime_type(Path::new("/www/v1.2/notes")), DEFAULT_MIME_TYPE);
    }
}
