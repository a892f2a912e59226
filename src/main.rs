// ==========================================
// 库存管理系统 - 命令行入口
// ==========================================
// 技术栈: clap (derive) + tokio
// 说明: 数量/单价按原始文本接收，由宽松转换规则解析
// ==========================================

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use inventario::api::ImportApiResponse;
use inventario::config::AppConfig;
use inventario::i18n::{t, t_with_args};
use inventario::importer::{coerce_decimal, coerce_int};
use inventario::{logging, AppState, StoreFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventario")]
#[command(about = "Inventario: tabla SQLite + registros TXT/JSON/CSV")]
#[command(version)]
struct Cli {
    /// Ruta de la base de datos (sobrescribe INVENTARIO_DB_PATH)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Directorio de los archivos planos (sobrescribe INVENTARIO_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Idioma de los mensajes: es | en (sobrescribe INVENTARIO_LOCALE)
    #[arg(long)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crea la base de datos y el directorio de datos, y muestra las rutas
    Init,

    /// Lista productos y totales
    List {
        /// Subcadena del nombre (sin distinguir mayúsculas)
        query: Option<String>,
    },

    /// Crea un producto
    Add {
        nombre: String,
        #[arg(allow_hyphen_values = true)]
        cantidad: Option<String>,
        #[arg(allow_hyphen_values = true)]
        precio: Option<String>,
    },

    /// Reemplaza nombre, cantidad y precio de un producto
    Edit {
        id: i64,
        nombre: String,
        #[arg(allow_hyphen_values = true)]
        cantidad: Option<String>,
        #[arg(allow_hyphen_values = true)]
        precio: Option<String>,
    },

    /// Elimina un producto
    Delete { id: i64 },

    /// Agrega un registro al archivo plano del formato indicado
    Save {
        /// txt | json | csv
        format: StoreFormat,
        nombre: Option<String>,
        #[arg(allow_hyphen_values = true)]
        cantidad: Option<String>,
        #[arg(allow_hyphen_values = true)]
        precio: Option<String>,
    },

    /// Muestra el contenido de un archivo plano
    Show {
        /// txt | json | csv
        format: StoreFormat,
    },

    /// Importa un archivo plano a la tabla de inventario
    Import {
        /// txt | json | csv | all
        target: String,
    },

    /// Registra un usuario
    Register {
        nombre: String,
        email: String,
        password: String,
    },

    /// Verifica credenciales
    Login { email: String, password: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let mut config = AppConfig::from_env();
    if let Some(db_path) = cli.db_path {
        config.db_path = db_path;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Init => {
            println!("{} {}", inventario::APP_NAME, inventario::VERSION);
            println!("db:    {}", state.config.db_path.display());
            println!("datos: {}", state.config.data_dir.display());
        }
        Commands::List { query } => {
            let view = state.inventory_api.list(query.as_deref())?;
            for p in &view.products {
                println!(
                    "{:>4}  {:<30} {:>6} {:>10.2} {:>12.2}",
                    p.id,
                    p.name,
                    p.quantity,
                    p.unit_price,
                    p.stock_value()
                );
            }
            println!(
                "total: {} / {:.2}",
                view.totals.total_items, view.totals.total_value
            );
        }
        Commands::Add {
            nombre,
            cantidad,
            precio,
        } => {
            let product = state.inventory_api.create(
                &nombre,
                coerce_int(cantidad.as_deref(), 0),
                coerce_decimal(precio.as_deref(), 0.0),
            )?;
            println!("{} (id={})", t("inventory.created"), product.id);
        }
        Commands::Edit {
            id,
            nombre,
            cantidad,
            precio,
        } => {
            state.inventory_api.update(
                id,
                &nombre,
                coerce_int(cantidad.as_deref(), 0),
                coerce_decimal(precio.as_deref(), 0.0),
            )?;
            println!("{}", t("inventory.updated"));
        }
        Commands::Delete { id } => {
            state.inventory_api.delete(id)?;
            let id = id.to_string();
            println!("{}", t_with_args("inventory.deleted", &[("id", id.as_str())]));
        }
        Commands::Save {
            format,
            nombre,
            cantidad,
            precio,
        } => {
            let resp = state.persistence_api.save(
                format,
                nombre.as_deref(),
                cantidad.as_deref(),
                precio.as_deref(),
            )?;
            println!("{}", resp.message);
        }
        Commands::Show { format } => {
            println!("{}", state.persistence_api.view(format)?);
        }
        Commands::Import { target } => {
            if target.trim().eq_ignore_ascii_case("all") {
                for resp in state.persistence_api.import_all().await {
                    print_import(&resp);
                }
            } else {
                let format: StoreFormat = target.parse().map_err(|e: String| anyhow!(e))?;
                let resp = state.persistence_api.import(format).await?;
                print_import(&resp);
            }
        }
        Commands::Register {
            nombre,
            email,
            password,
        } => {
            let user = state.auth_api.register(&nombre, &email, &password)?;
            println!("{}", t_with_args("auth.registered", &[("email", user.email.as_str())]));
        }
        Commands::Login { email, password } => {
            let user = state.auth_api.login(&email, &password)?;
            println!("{}", t_with_args("auth.welcome", &[("nombre", user.nombre.as_str())]));
        }
    }

    Ok(())
}

fn print_import(resp: &ImportApiResponse) {
    let r = &resp.report;
    println!(
        "{} [ok={} sin_nombre={} omitidas={} {}ms]",
        resp.message, r.processed, r.not_processed, r.skipped, r.elapsed_ms
    );
}
