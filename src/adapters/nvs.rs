//! NVS (Non-Volatile Storage) configuration adapter.
//!
//! Implements [`ConfigPort`] by reading the system configuration as a
//! postcard blob from the NVS partition.  Missing or corrupt data falls
//! back to [`SystemConfig::default`] — runtime controller state is never
//! persisted, so there is no write path.
//!
//! On non-espidf targets the adapter simply serves defaults; host tests
//! that need a specific configuration construct it directly.

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use log::info;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const CONFIG_NAMESPACE: &str = "climabox";
#[cfg(target_os = "espidf")]
const MAX_BLOB_SIZE: usize = 256;

pub struct NvsAdapter;

impl NvsAdapter {
    /// Create the adapter and initialise NVS flash.
    ///
    /// Returns `Err(ConfigError::IoError)` if flash initialisation fails
    /// unrecoverably. On first boot or after a version mismatch the NVS
    /// partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any concurrent NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                log::warn!("NVS: erasing and re-initialising flash partition");
                let ret2 = unsafe { nvs_flash_erase() };
                if ret2 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                let ret3 = unsafe { nvs_flash_init() };
                if ret3 != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: host backend, serving defaults");

        Ok(Self)
    }

    /// Read the raw config blob, if one is stored.
    #[cfg(target_os = "espidf")]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let mut ns_buf = [0u8; 16];
        let ns_bytes = CONFIG_NAMESPACE.as_bytes();
        ns_buf[..ns_bytes.len()].copy_from_slice(ns_bytes);

        let mut handle: nvs_handle_t = 0;
        // SAFETY: single main-task context; handle is closed before return.
        let ret = unsafe {
            nvs_open(
                ns_buf.as_ptr() as *const _,
                nvs_open_mode_t_NVS_READONLY,
                &mut handle,
            )
        };
        if ret == ESP_ERR_NVS_NOT_FOUND {
            return Ok(None);
        }
        if ret != ESP_OK {
            return Err(ConfigError::IoError);
        }

        let key = b"syscfg\0";
        let mut size: usize = 0;
        let result = unsafe {
            let ret = nvs_get_blob(
                handle,
                key.as_ptr() as *const _,
                core::ptr::null_mut(),
                &mut size,
            );
            if ret == ESP_ERR_NVS_NOT_FOUND {
                Ok(None)
            } else if ret != ESP_OK || size == 0 || size > MAX_BLOB_SIZE {
                Err(ConfigError::IoError)
            } else {
                let mut buf = vec![0u8; size];
                let ret = nvs_get_blob(
                    handle,
                    key.as_ptr() as *const _,
                    buf.as_mut_ptr() as *mut _,
                    &mut size,
                );
                if ret == ESP_OK {
                    buf.truncate(size);
                    Ok(Some(buf))
                } else {
                    Err(ConfigError::IoError)
                }
            }
        };
        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            match self.read_blob()? {
                Some(bytes) => {
                    let cfg: SystemConfig =
                        postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
                    info!("NvsAdapter: loaded config from NVS");
                    Ok(cfg)
                }
                None => {
                    info!("NvsAdapter: no stored config, using defaults");
                    Ok(SystemConfig::default())
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        Ok(SystemConfig::default())
    }
}
