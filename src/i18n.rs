/// Localized UI strings. Every [`Message`] has a translation in every
/// [`Locale`]: the lookup is an exhaustive match, so a missing translation
/// is a compile error rather than a runtime fallback to the raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    AppTitle,
    Loading,
    LocationRequesting,
    UsingDefaultLocation,
    OutageDetected,
    OutageClear,
    OutageChecking,
    OutageUnknown,
    EstimatedRestore,
    AffectedCustomers,
    OutageId,
    NotificationsStatus,
    NotificationsEnable,
    NotificationsDisable,
    NotificationsEnabled,
    NotificationsDisabled,
    NotificationsNotSupported,
    NotificationsEnableFailed,
    NotificationsDisableFailed,
    Permission,
    PermissionGranted,
    PermissionDenied,
    PermissionDefault,
    AdvanceNoticeLabel,
}

pub fn text(locale: Locale, message: Message) -> &'static str {
    match locale {
        Locale::En => match message {
            Message::AppTitle => "Outage Map",
            Message::Loading => "Loading...",
            Message::LocationRequesting => "Requesting location permission...",
            Message::UsingDefaultLocation => "Using default location",
            Message::OutageDetected => "Outage Detected",
            Message::OutageClear => "No Outage Detected",
            Message::OutageChecking => "Checking outage status...",
            Message::OutageUnknown => "Outage status unknown",
            Message::EstimatedRestore => "Estimated Restore",
            Message::AffectedCustomers => "Affected Customers",
            Message::OutageId => "Outage ID",
            Message::NotificationsStatus => "Notification Status",
            Message::NotificationsEnable => "Enable Notifications",
            Message::NotificationsDisable => "Disable Notifications",
            Message::NotificationsEnabled => "Enabled",
            Message::NotificationsDisabled => "Disabled",
            Message::NotificationsNotSupported => {
                "Push notifications are not supported in your browser"
            }
            Message::NotificationsEnableFailed => {
                "Failed to enable notifications. Please try again."
            }
            Message::NotificationsDisableFailed => {
                "Failed to disable notifications. Please try again."
            }
            Message::Permission => "Permission",
            Message::PermissionGranted => "Granted",
            Message::PermissionDenied => "Denied",
            Message::PermissionDefault => "Not yet requested",
            Message::AdvanceNoticeLabel => "Get notified before outages",
        },
        Locale::Es => match message {
            Message::AppTitle => "Mapa de Interrupciones",
            Message::Loading => "Cargando...",
            Message::LocationRequesting => "Solicitando permiso de ubicación...",
            Message::UsingDefaultLocation => "Usando la ubicación predeterminada",
            Message::OutageDetected => "Interrupción Detectada",
            Message::OutageClear => "Sin Interrupciones",
            Message::OutageChecking => "Verificando estado de interrupción...",
            Message::OutageUnknown => "Estado de interrupción desconocido",
            Message::EstimatedRestore => "Restauración Estimada",
            Message::AffectedCustomers => "Clientes Afectados",
            Message::OutageId => "ID de Interrupción",
            Message::NotificationsStatus => "Estado de Notificaciones",
            Message::NotificationsEnable => "Habilitar Notificaciones",
            Message::NotificationsDisable => "Deshabilitar Notificaciones",
            Message::NotificationsEnabled => "Habilitadas",
            Message::NotificationsDisabled => "Deshabilitadas",
            Message::NotificationsNotSupported => {
                "Las notificaciones push no son compatibles con su navegador"
            }
            Message::NotificationsEnableFailed => {
                "No se pudieron habilitar las notificaciones. Inténtelo de nuevo."
            }
            Message::NotificationsDisableFailed => {
                "No se pudieron deshabilitar las notificaciones. Inténtelo de nuevo."
            }
            Message::Permission => "Permiso",
            Message::PermissionGranted => "Concedido",
            Message::PermissionDenied => "Denegado",
            Message::PermissionDefault => "Aún no solicitado",
            Message::AdvanceNoticeLabel => "Reciba avisos antes de las interrupciones",
        },
    }
}
