#![no_std]
#![no_main]

use crsf_gamepad_rp2040::{
    configure_usb_hid, configure_usb_serial, Bridge, BytePipe, CrsfInput, EmbassyClock,
    GamepadBridge, GamepadHidWriter, HidEndpoint, HidSink, PipePort, TimedByteChannel, UartPort,
    UsbStateHandler, CRSF_BAUDRATE,
};
use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartRx, UartTx};
use embassy_rp::usb::Driver;
use embassy_sync::channel::Channel;
use embassy_sync::pipe::Pipe;
use embassy_time::Instant;
use embassy_usb::class::cdc_acm::{self, Receiver, Sender};
use embassy_usb::class::hid;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Bytes from the receiver with their arrival times, waiting for the bridge.
static UART_RX: TimedByteChannel = Channel::new();
/// Bytes for the receiver (passthrough only).
static UART_TX: BytePipe = Pipe::new();
/// Bytes from the host's virtual serial port.
static CDC_RX: BytePipe = Pipe::new();
/// Bytes for the host's virtual serial port.
static CDC_TX: BytePipe = Pipe::new();

/// Latest HID report and endpoint state.
static HID_ENDPOINT: HidEndpoint = HidEndpoint::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Class states.
static HID_STATE: StaticCell<hid::State> = StaticCell::new();
static CDC_STATE: StaticCell<cdc_acm::State> = StaticCell::new();
static USB_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("CRSF-to-Gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = CRSF_BAUDRATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (uart_tx, uart_rx) = uart.split();

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("CRSF-to-Gamepad Bridge");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(USB_HANDLER.init(UsbStateHandler::new(&HID_ENDPOINT)));

    // Configure HID and CDC-ACM classes
    let hid_writer = configure_usb_hid(&mut builder, HID_STATE.init(hid::State::new()));
    let cdc = configure_usb_serial(&mut builder, CDC_STATE.init(cdc_acm::State::new()));
    let (cdc_tx, cdc_rx) = cdc.split();

    // Build the USB device
    let usb_device = builder.build();

    let bridge = GamepadBridge::new(
        CrsfInput::new(),
        UartPort::new(&UART_RX, &UART_TX),
        PipePort::new(&CDC_RX, &CDC_TX),
        HidSink::new(&HID_ENDPOINT),
        EmbassyClock,
    );

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(uart_rx_task(uart_rx).unwrap());
    spawner.spawn(uart_tx_task(uart_tx).unwrap());
    spawner.spawn(cdc_rx_task(cdc_rx).unwrap());
    spawner.spawn(cdc_tx_task(cdc_tx).unwrap());
    spawner.spawn(hid_task(hid_writer).unwrap());
    spawner.spawn(bridge_task(bridge).unwrap());

    info!("CRSF-to-Gamepad initialized, waiting for receiver...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Bridge task - runs the decode/passthrough loop, yielding between ticks.
#[embassy_executor::task]
async fn bridge_task(mut bridge: Bridge) {
    loop {
        bridge.tick();
        yield_now().await;
    }
}

/// Receiver to bridge, one byte at a time, stamped as it comes off the wire.
#[embassy_executor::task]
async fn uart_rx_task(mut rx: UartRx<'static, Async>) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => UART_RX.send((byte[0], Instant::now().as_micros())).await,
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Bridge to receiver.
#[embassy_executor::task]
async fn uart_tx_task(mut tx: UartTx<'static, Async>) {
    let mut buf = [0u8; 64];
    loop {
        let n = UART_TX.read(&mut buf).await;
        if let Err(e) = tx.write(&buf[..n]).await {
            warn!("UART write error: {:?}", e);
        }
    }
}

/// Host to bridge.
#[embassy_executor::task]
async fn cdc_rx_task(mut rx: Receiver<'static, Driver<'static, USB>>) {
    let mut buf = [0u8; 64];
    loop {
        rx.wait_connection().await;
        info!("Virtual serial connected");
        while let Ok(n) = rx.read_packet(&mut buf).await {
            CDC_RX.write_all(&buf[..n]).await;
        }
        info!("Virtual serial disconnected");
    }
}

/// Bridge to host.
#[embassy_executor::task]
async fn cdc_tx_task(mut tx: Sender<'static, Driver<'static, USB>>) {
    // Always a short packet, so no zero-length packet is needed to end a transfer
    let mut buf = [0u8; 63];
    loop {
        tx.wait_connection().await;
        loop {
            let n = CDC_TX.read(&mut buf).await;
            if tx.write_packet(&buf[..n]).await.is_err() {
                break;
            }
        }
    }
}

/// HID task - sends each report handed over by the bridge.
#[embassy_executor::task]
async fn hid_task(mut writer: GamepadHidWriter<'static>) {
    // Wait for USB to be ready
    writer.ready().await;
    info!("USB HID ready, forwarding gamepad reports...");

    loop {
        let report = HID_ENDPOINT.next_report().await;
        if let Err(e) = writer.write(&report).await {
            warn!("HID write error: {:?}", e);
        }
        HID_ENDPOINT.report_done();
    }
}
