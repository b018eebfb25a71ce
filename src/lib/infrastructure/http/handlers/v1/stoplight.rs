//! API documentation.

use axum::response::Html;

/// Stoplight API documentation.
pub async fn handler() -> Html<&'static str> {
    Html(
        r#"
<html lang="en">
<head>
    <title>Order Mail API</title>
    <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
</head>
<body>
    <main role="main">
        <elements-api apiDescriptionUrl="/api/v1/openapi.json" router="hash" />
    </main>
</body>
</html>
"#,
    )
}
