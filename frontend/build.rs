// The wasm bundle has no process environment: forward the client settings
// from `.env` / the build environment as compile-time variables.
const FORWARDED: [&str; 2] = ["RAG_CHAT_API_URL", "RAG_CHAT_GOOGLE_CLIENT_ID"];

fn main() {
    if let Ok(path) = dotenvy::dotenv() {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    for key in FORWARDED {
        println!("cargo:rerun-if-env-changed={key}");
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
