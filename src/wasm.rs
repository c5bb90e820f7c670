//! WebAssembly bindings for piicsa

use wasm_bindgen::prelude::*;
use crate::{source, Converter, DitherMode, LumaMode, Ramp};

#[wasm_bindgen]
pub struct WasmConverter {
    inner: Converter,
}

fn js_err(e: crate::PiicsaError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        WasmConverter { inner: Converter::new() }
    }

    #[wasm_bindgen]
    pub fn set_width(&mut self, width: u32) {
        self.inner = std::mem::take(&mut self.inner).with_width(width);
    }

    #[wasm_bindgen]
    pub fn set_height(&mut self, height: u32) {
        self.inner = std::mem::take(&mut self.inner).with_height(height);
    }

    /// Size slider value; 1.0 = 200x100 cells
    #[wasm_bindgen]
    pub fn set_scale(&mut self, scale: f64) {
        let (w, h) = crate::ConversionParameters::scaled_size(scale);
        self.inner = std::mem::take(&mut self.inner).with_width(w).with_height(h);
    }

    #[wasm_bindgen]
    pub fn set_preserve_aspect_ratio(&mut self, enabled: bool) {
        self.inner = std::mem::take(&mut self.inner).preserve_aspect_ratio(enabled);
    }

    #[wasm_bindgen]
    pub fn set_brightness(&mut self, brightness: f64) {
        self.inner = std::mem::take(&mut self.inner).with_brightness(brightness);
    }

    #[wasm_bindgen]
    pub fn set_contrast(&mut self, contrast: f64) {
        self.inner = std::mem::take(&mut self.inner).with_contrast(contrast);
    }

    #[wasm_bindgen]
    pub fn set_dither(&mut self, enabled: bool) {
        let mode = if enabled { DitherMode::FloydSteinberg } else { DitherMode::None };
        self.inner = std::mem::take(&mut self.inner).with_dither(mode);
    }

    #[wasm_bindgen]
    pub fn set_average_luma(&mut self, enabled: bool) {
        let mode = if enabled { LumaMode::Average } else { LumaMode::Perceptual };
        self.inner = std::mem::take(&mut self.inner).with_luma(mode);
    }

    #[wasm_bindgen]
    pub fn set_ramp(&mut self, symbols: &str) -> Result<(), JsValue> {
        let ramp = Ramp::new(symbols).map_err(js_err)?;
        self.inner = std::mem::take(&mut self.inner).with_ramp(ramp);
        Ok(())
    }

    /// Convert canvas RGBA data (`ImageData.data`) to text
    #[wasm_bindgen]
    pub fn convert(&self, image_data: &[u8], width: u32, height: u32) -> Result<String, JsValue> {
        let image = source::from_raw(width, height, image_data.to_vec()).map_err(js_err)?;
        let art = self.inner.convert(&image).map_err(js_err)?;
        Ok(art.to_text())
    }

    /// Decode an encoded file (PNG, JPEG, ...) and convert it
    #[wasm_bindgen]
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String, JsValue> {
        let art = self.inner.convert_bytes(bytes).map_err(js_err)?;
        Ok(art.to_text())
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}
