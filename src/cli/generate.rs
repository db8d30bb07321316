//! Generate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::audio::AudioLibrary;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, PixmonConfig};
use crate::hybrid::{
    Enhancer, GenerationRequest, GenerationResult, HttpEnhancer, HybridGenerator, PixelSize,
};
use crate::output::{
    data_url_mime, extension_for, file_stem, generate_output_path, write_data_url,
};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the generate command
pub fn run_generate(
    description: &str,
    config_path: Option<&Path>,
    output: Option<&Path>,
    json: bool,
    overrides: CliOverrides,
    colors: Vec<String>,
    batch_token: Option<String>,
) -> ExitCode {
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Err(e) = merge_cli_overrides(&mut config, &overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let request = match build_request(description, &config, colors) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: Failed to start async runtime: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let audio = AudioLibrary::new(config.audio.asset_root.clone());
    let result = match config.enhancement_endpoint() {
        Some(endpoint) => runtime.block_on(generate_with(
            HybridGenerator::new(HttpEnhancer::new(endpoint), audio),
            &request,
            batch_token,
        )),
        None => runtime.block_on(generate_with(
            HybridGenerator::offline(audio),
            &request,
            batch_token,
        )),
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: Failed to serialize result: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else if result.success {
        if let Err(code) = write_outputs(&result, description, output) {
            return code;
        }
    }

    if !result.success {
        eprintln!("Error: {}", result.message);
        return ExitCode::from(EXIT_ERROR);
    }
    eprintln!("{} [{}]", result.message, result.method);
    ExitCode::from(EXIT_SUCCESS)
}

fn build_request(
    description: &str,
    config: &PixmonConfig,
    colors: Vec<String>,
) -> Result<GenerationRequest, String> {
    let size = PixelSize::from_pixels(config.defaults.pixel_size).map_err(|e| e.to_string())?;
    let request = GenerationRequest::new(description, size, config.defaults.quantity)
        .map_err(|e| e.to_string())?;
    if colors.is_empty() {
        Ok(request)
    } else {
        request.with_palette(colors).map_err(|e| e.to_string())
    }
}

async fn generate_with<E: Enhancer>(
    generator: HybridGenerator<E>,
    request: &GenerationRequest,
    batch_token: Option<String>,
) -> GenerationResult {
    let generator = match batch_token {
        Some(token) => generator.with_batch_token(token),
        None => generator,
    };
    generator.generate(request).await
}

/// Write every image and audio payload as `{stem}_{n}.{ext}`.
fn write_outputs(
    result: &GenerationResult,
    description: &str,
    output: Option<&Path>,
) -> Result<(), ExitCode> {
    let stem = file_stem(description);
    for urls in [&result.images, &result.audios] {
        for (index, url) in urls.iter().enumerate() {
            let extension = extension_for(data_url_mime(url).unwrap_or_default());
            let path = generate_output_path(output, &stem, index, extension);
            if let Err(e) = write_data_url(url, &path) {
                eprintln!("Error: Failed to write '{}': {}", path.display(), e);
                return Err(ExitCode::from(EXIT_ERROR));
            }
            println!("Saved: {}", path.display());
        }
    }
    Ok(())
}
